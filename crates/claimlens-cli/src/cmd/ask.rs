use crate::output::{compact, print_json, print_table};
use anyhow::Context;
use claimlens_core::config::Config;
use claimlens_core::{
    orchestrate, Action, HttpResourceClient, InMemoryResourceClient, OrchestrationRequest,
    ResourceClient,
};
use std::path::Path;

pub fn run(
    config: &Config,
    prompt: &str,
    claim_id: &str,
    fixtures: Option<&Path>,
    json: bool,
) -> anyhow::Result<()> {
    let client: Box<dyn ResourceClient> = match fixtures {
        Some(path) => Box::new(
            InMemoryResourceClient::from_file(path)
                .with_context(|| format!("failed to load fixtures from {}", path.display()))?,
        ),
        None => Box::new(
            HttpResourceClient::new(&config.backend.base_url, config.backend.timeout())
                .context("failed to build backend client")?,
        ),
    };

    let request = OrchestrationRequest::new(prompt, claim_id);
    let envelope = orchestrate(client.as_ref(), &request)?;

    if json {
        return print_json(&envelope);
    }

    println!("Prompt:  {}", envelope.request_text);
    println!("Claim:   {}", envelope.entity_id);
    println!();

    let rows = envelope
        .results
        .iter()
        .map(|outcome| {
            let status = if outcome.is_success() {
                "ok"
            } else if outcome.action == Action::Unsupported {
                "unsupported"
            } else {
                "failed"
            };
            let detail = outcome
                .message
                .clone()
                .or_else(|| outcome.data.as_ref().map(compact))
                .unwrap_or_default();
            vec![outcome.label.clone(), status.to_string(), detail]
        })
        .collect();
    print_table(&["STEP", "STATUS", "DETAIL"], rows);
    Ok(())
}
