//! Result encoders: one strategy per [`OutputFormat`].

use sumetife_core::error::EncodeError;
use sumetife_core::models::{AggregateResult, OutputFormat};

/// Serializes aggregated results into the bytes of an output file.
pub trait MetricEncoder {
    fn encode(&self, results: &[AggregateResult]) -> Result<Vec<u8>, EncodeError>;
}

/// Select the encoder for `format`.
pub fn encoder_for(format: OutputFormat) -> Box<dyn MetricEncoder> {
    match format {
        OutputFormat::Json => Box::new(JsonEncoder),
        OutputFormat::Yaml => Box::new(YamlEncoder),
    }
}

/// Pretty-printed JSON array of `{level_name, total_value}` objects.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEncoder;

impl MetricEncoder for JsonEncoder {
    fn encode(&self, results: &[AggregateResult]) -> Result<Vec<u8>, EncodeError> {
        let mut bytes = serde_json::to_vec_pretty(results)?;
        bytes.push(b'\n');
        Ok(bytes)
    }
}

/// YAML sequence of `{level_name, total_value}` mappings.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlEncoder;

impl MetricEncoder for YamlEncoder {
    fn encode(&self, results: &[AggregateResult]) -> Result<Vec<u8>, EncodeError> {
        Ok(serde_yaml::to_string(results)?.into_bytes())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    fn sample() -> Vec<AggregateResult> {
        vec![
            AggregateResult {
                category: "level1".to_string(),
                total: 126,
            },
            AggregateResult {
                category: "lobby_screen".to_string(),
                total: -73,
            },
        ]
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        level_name: String,
        total_value: i64,
    }

    fn expected_rows() -> Vec<Row> {
        vec![
            Row {
                level_name: "level1".to_string(),
                total_value: 126,
            },
            Row {
                level_name: "lobby_screen".to_string(),
                total_value: -73,
            },
        ]
    }

    #[test]
    fn test_json_encoder_output_parses_back() {
        let bytes = JsonEncoder.encode(&sample()).unwrap();
        let rows: Vec<Row> = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(rows, expected_rows());
    }

    #[test]
    fn test_json_encoder_uses_wire_field_names() {
        let bytes = JsonEncoder.encode(&sample()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value[0]["level_name"], "level1");
        assert_eq!(value[0]["total_value"], 126);
        assert!(value[0].get("category").is_none());
    }

    #[test]
    fn test_json_encoder_empty_list() {
        let bytes = JsonEncoder.encode(&[]).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "[]\n");
    }

    #[test]
    fn test_json_encoder_is_deterministic() {
        assert_eq!(
            JsonEncoder.encode(&sample()).unwrap(),
            JsonEncoder.encode(&sample()).unwrap()
        );
    }

    #[test]
    fn test_yaml_encoder_output_parses_back() {
        let bytes = YamlEncoder.encode(&sample()).unwrap();
        let rows: Vec<Row> = serde_yaml::from_slice(&bytes).unwrap();
        assert_eq!(rows, expected_rows());
    }

    #[test]
    fn test_yaml_encoder_layout() {
        let text = String::from_utf8(YamlEncoder.encode(&sample()[..1]).unwrap()).unwrap();
        assert_eq!(text, "- level_name: level1\n  total_value: 126\n");
    }

    #[test]
    fn test_encoder_for_selects_strategy() {
        let json = encoder_for(OutputFormat::Json).encode(&sample()).unwrap();
        let yaml = encoder_for(OutputFormat::Yaml).encode(&sample()).unwrap();
        assert!(json.starts_with(b"["));
        assert!(yaml.starts_with(b"- level_name"));
    }
}
