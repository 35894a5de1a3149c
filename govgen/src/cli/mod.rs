mod abi;
mod calldata;
mod generate;

pub use self::abi::Abi;
pub use self::calldata::Calldata;
pub use self::generate::Generate;

/// Prints `value` as JSON on standard output.
fn print_json<T: serde::Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}
