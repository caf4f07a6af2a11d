use crate::output::print_json;
use roulette_core::invocation::{self, Request};
use roulette_core::{Allocator, ConfigStore};

pub fn run(store: &ConfigStore, json: bool) -> anyhow::Result<()> {
    let outcome = invocation::handle(Request::Reset, &Allocator::standard(), store)?;
    if json {
        return print_json(&outcome);
    }
    println!("Port database has been reset to default state");
    Ok(())
}
