use roulette_core::token::extract_port;

/// `port-roulette extract`: print only the port of a token.
pub fn run(input: &str) -> anyhow::Result<()> {
    println!("{}", extract_port(input));
    Ok(())
}
