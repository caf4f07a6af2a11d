use crate::output::{print_json, print_table};
use anyhow::Context;
use roulette_core::ConfigStore;

pub fn run(store: &ConfigStore, json: bool) -> anyhow::Result<()> {
    // Listing is read-only, so surface a broken file instead of hiding it.
    let registry = store
        .try_load()
        .with_context(|| format!("failed to read {}", store.path().display()))?;

    if json {
        return print_json(&registry);
    }

    if registry.projects.is_empty() {
        println!("No ports assigned. ({})", store.path().display());
        return Ok(());
    }

    let rows = registry
        .by_port()
        .into_iter()
        .map(|(project, port)| vec![port.to_string(), project.to_string()])
        .collect();
    print_table(&["PORT", "PROJECT"], rows);
    Ok(())
}
