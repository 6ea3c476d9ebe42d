//! Value encoding supplied by the store's callers.

/// Converts application values to and from their stored string form.
///
/// The store never interprets values; each caller brings a codec for the
/// values it keeps, e.g. a preset encodes to its identity and decodes back
/// through a graph lookup.
pub trait StateCodec {
    type Value;

    fn encode(&self, value: &Self::Value) -> String;

    /// Decodes a stored string, describing the problem on failure.
    fn decode(&self, raw: &str) -> Result<Self::Value, String>;
}

/// Stores strings as they are.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawCodec;

impl StateCodec for RawCodec {
    type Value = String;

    fn encode(&self, value: &String) -> String {
        value.clone()
    }

    fn decode(&self, raw: &str) -> Result<String, String> {
        Ok(raw.to_string())
    }
}
