use crate::output::print_json;
use roulette_core::token::ConfirmationToken;
use roulette_core::{invocation, Allocator, ConfigStore, Outcome, RouletteError};

/// `port-roulette save`: runs when the user picks a row in Alfred.
///
/// A confirmation token is committed and its port printed for the clipboard.
/// Anything else (an existing port's bare number) is printed unchanged.
pub fn run(store: &ConfigStore, input: &str, json: bool) -> anyhow::Result<()> {
    let input = input.trim();
    if !ConfirmationToken::looks_like_token(input) {
        println!("{input}");
        return Ok(());
    }

    let allocator = Allocator::standard();
    match invocation::invoke(input, &allocator, store) {
        Ok(outcome) if json => print_json(&outcome),
        Ok(Outcome::Confirmed { port, .. } | Outcome::AlreadyAssigned { port, .. }) => {
            println!("{port}");
            Ok(())
        }
        Ok(other) => {
            // Token input only ever confirms; anything else is a dispatch bug.
            anyhow::bail!("unexpected outcome for save: {other:?}")
        }
        Err(e) => {
            tracing::warn!(error = %e, input, "save rejected");
            if json {
                return print_json(&serde_json::json!({ "error": e.to_string() }));
            }
            match e {
                RouletteError::MalformedToken(_) => println!("Invalid argument format"),
                other => println!("{other}"),
            }
            Ok(())
        }
    }
}
