use log::{
    Record,
    kv::{Error, Key, Value, VisitSource},
};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::encode::{Color, Encode, Style, Write};
use serde::Deserialize;
use std::io;

const DEFAULT_PATTERN: &str = "{d} {l} {t} - {m}";
const REDACTED: &str = "<REDACTED>";

fn default_redacted_keys() -> Vec<String> {
    vec!["password".to_string(), "authorization".to_string()]
}

#[derive(Debug, Deserialize)]
pub struct StructuredConsoleEncoderConfig {
    pub pattern: Option<String>,
    /// Keys whose values are never printed.
    #[serde(default = "default_redacted_keys")]
    pub redacted_keys: Vec<String>,
}

/// Renders a record with a pattern, then its key-value pairs as ` key=value`.
///
/// Values containing whitespace are quoted so each pair stays one token.
#[derive(Debug)]
pub struct StructuredConsoleEncoder {
    delegate: PatternEncoder,
    redacted_keys: Vec<String>,
}

impl StructuredConsoleEncoder {
    pub fn new(pattern: &str) -> Self {
        Self::with_redacted_keys(pattern, default_redacted_keys())
    }

    pub fn with_redacted_keys(pattern: &str, redacted_keys: Vec<String>) -> Self {
        Self {
            delegate: PatternEncoder::new(pattern),
            redacted_keys,
        }
    }
}

impl Encode for StructuredConsoleEncoder {
    fn encode(&self, w: &mut dyn Write, record: &Record) -> anyhow::Result<()> {
        self.delegate.encode(w, record)?;

        let mut visitor = TextVisitor {
            writer: w,
            redacted_keys: &self.redacted_keys,
            io_err: None,
        };

        if let Err(kv_err) = record.key_values().visit(&mut visitor) {
            if let Some(io_err) = visitor.io_err {
                return Err(io_err.into());
            }
            write!(w, " [KV Error: {}]", kv_err)?;
        }

        w.write_all(b"\n")?;
        Ok(())
    }
}

struct TextVisitor<'a> {
    writer: &'a mut dyn Write,
    redacted_keys: &'a [String],
    io_err: Option<io::Error>,
}

impl TextVisitor<'_> {
    fn is_redacted(&self, key: &Key<'_>) -> bool {
        self.redacted_keys
            .iter()
            .any(|redacted| redacted.eq_ignore_ascii_case(key.as_str()))
    }

    fn write_pair(&mut self, key: &Key<'_>, value: &Value<'_>) -> io::Result<()> {
        self.writer.set_style(Style::new().text(Color::Cyan))?;
        write!(self.writer, " {}=", key)?;
        self.writer.set_style(&Style::default())?;

        if self.is_redacted(key) {
            return write!(self.writer, "{REDACTED}");
        }

        let rendered = value.to_string();
        if rendered.is_empty() || rendered.contains(char::is_whitespace) {
            write!(self.writer, "{:?}", rendered)
        } else {
            write!(self.writer, "{}", rendered)
        }
    }
}

impl<'kvs> VisitSource<'kvs> for TextVisitor<'_> {
    fn visit_pair(&mut self, key: Key<'kvs>, value: Value<'kvs>) -> Result<(), Error> {
        if let Err(e) = self.write_pair(&key, &value) {
            self.io_err = Some(e);
            return Err(Error::msg("io error during visit"));
        }

        Ok(())
    }
}

pub struct StructuredConsoleEncoderDeserializer;

impl log4rs::config::Deserialize for StructuredConsoleEncoderDeserializer {
    type Trait = dyn Encode;
    type Config = StructuredConsoleEncoderConfig;

    fn deserialize(
        &self,
        config: StructuredConsoleEncoderConfig,
        _: &log4rs::config::Deserializers,
    ) -> anyhow::Result<Box<dyn Encode>> {
        let pattern = config.pattern.as_deref().unwrap_or(DEFAULT_PATTERN);
        Ok(Box::new(StructuredConsoleEncoder::with_redacted_keys(
            pattern,
            config.redacted_keys,
        )))
    }
}
