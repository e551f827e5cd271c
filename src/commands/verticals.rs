use anyhow::Result;
use std::io::Write;

use crate::cli::OutputFormat;
use crate::output;
use crate::scoring::verticals;

pub fn list_verticals<W: Write>(format: OutputFormat, out: &mut W) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let all: Vec<_> = verticals::verticals().collect();
            output::write_json(out, &all)?;
        }
        OutputFormat::Text => output::write_verticals(out, verticals::verticals())?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_json_listing() {
        let mut out = Vec::new();
        list_verticals(OutputFormat::Json, &mut out).unwrap();
        let listed: Value = serde_json::from_slice(&out).unwrap();
        let listed = listed.as_array().unwrap();
        assert_eq!(listed.len(), verticals::verticals().count());
        assert!(listed.iter().any(|v| v["name"] == "healthcare"));
    }
}
