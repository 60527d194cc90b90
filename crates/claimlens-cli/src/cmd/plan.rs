use crate::output::{print_json, print_table};
use claimlens_core::planner::UNSUPPORTED_MESSAGE;
use claimlens_core::Planner;

pub fn run(prompt: &str, claim_id: &str, json: bool) -> anyhow::Result<()> {
    let plan = Planner::default().plan(prompt, claim_id);

    if json {
        let value = serde_json::json!({
            "prompt": prompt,
            "claim_id": claim_id,
            "actions": plan,
        });
        return print_json(&value);
    }

    if plan.is_unsupported() {
        println!("Unsupported: {UNSUPPORTED_MESSAGE}");
        return Ok(());
    }

    let rows = plan
        .iter()
        .enumerate()
        .map(|(i, action)| vec![(i + 1).to_string(), action.to_string()])
        .collect();
    print_table(&["#", "ACTION"], rows);
    Ok(())
}
