//! CLI argument parsing

use clap::Parser;

/// Parse a string as a hex or decimal u8
fn parse_hex_u8(s: &str) -> Result<u8, String> {
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u8::from_str_radix(hex, 16).map_err(|e| format!("Invalid hex value: {}", e))
    } else {
        s.parse::<u8>().map_err(|e| format!("Invalid number: {}", e))
    }
}

#[derive(Parser)]
#[command(name = "sbsgauge")]
#[command(author, version, about = "Smart-battery fuel gauge reader", long_about = None)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// I2C bus index (opens /dev/i2c-<BUS>)
    #[arg(short, long, default_value_t = 1)]
    pub bus: u32,

    /// 7-bit slave address of the pack (hex or decimal)
    #[arg(short, long, default_value = "0x0B", value_parser = parse_hex_u8)]
    pub address: u8,

    /// Seconds to sleep between sweeps
    #[arg(short, long, default_value_t = 1)]
    pub interval: u64,

    /// Number of sweeps to run (0 = poll forever)
    #[arg(short, long, default_value_t = 0)]
    pub count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_accepts_hex_and_decimal() {
        assert_eq!(parse_hex_u8("0x0B").unwrap(), 0x0B);
        assert_eq!(parse_hex_u8("11").unwrap(), 11);
        assert!(parse_hex_u8("0x1FF").is_err());
    }

    #[test]
    fn defaults_match_the_pack() {
        let cli = Cli::parse_from(["sbsgauge"]);
        assert_eq!(cli.bus, 1);
        assert_eq!(cli.address, 0x0B);
        assert_eq!(cli.interval, 1);
        assert_eq!(cli.count, 0);
    }
}
