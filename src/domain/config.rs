//! Merge job configuration

use super::{DEFAULT_USERNAME_COLUMN, DEFAULT_VALUE_COLUMN};
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::path::Path;

/// Declarative description of one merge run.
///
/// Older configuration files used `input`, `summary` and `header` for what is
/// now `defaults`, `sources` and `caption`; both spellings are accepted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(alias = "input", deserialize_with = "null_as_default")]
    pub defaults: Defaults,

    /// Sources in declaration order. The order fixes both the output column
    /// order and the ordinal used for generated captions.
    #[serde(alias = "summary", deserialize_with = "ordered_sources")]
    pub sources: Vec<SourceSpec>,

    #[serde(deserialize_with = "null_as_default")]
    pub output: OutputSpec,

    /// Glob pattern of the patch file, if any.
    pub patch: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub username: Option<String>,
    pub value: Option<String>,
    /// Directory every source and patch pattern is resolved against.
    pub path: Option<String>,
}

impl Defaults {
    pub fn username(&self) -> &str {
        self.username.as_deref().unwrap_or(DEFAULT_USERNAME_COLUMN)
    }

    pub fn value(&self) -> &str {
        self.value.as_deref().unwrap_or(DEFAULT_VALUE_COLUMN)
    }

    pub fn base_dir(&self) -> &Path {
        Path::new(self.path.as_deref().unwrap_or(""))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputSpec {
    pub username: Option<String>,
}

impl OutputSpec {
    pub fn username(&self) -> &str {
        self.username.as_deref().unwrap_or(DEFAULT_USERNAME_COLUMN)
    }
}

/// One `sources` entry: a file pattern plus optional column overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceSpec {
    pub pattern: String,
    pub username: Option<String>,
    pub value: Option<String>,
    pub caption: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SourceOptions {
    username: Option<String>,
    value: Option<String>,
    #[serde(alias = "header")]
    caption: Option<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserialize the `sources` mapping into a `Vec`, keeping document order.
fn ordered_sources<'de, D>(deserializer: D) -> Result<Vec<SourceSpec>, D::Error>
where
    D: Deserializer<'de>,
{
    struct SourcesVisitor;

    impl<'de> Visitor<'de> for SourcesVisitor {
        type Value = Vec<SourceSpec>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a mapping from file pattern to source options")
        }

        fn visit_none<E: serde::de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_some<D2: Deserializer<'de>>(self, d: D2) -> Result<Self::Value, D2::Error> {
            d.deserialize_map(self)
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut sources = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((pattern, options)) = map.next_entry::<String, Option<SourceOptions>>()?
            {
                let options = options.unwrap_or_default();
                sources.push(SourceSpec {
                    pattern,
                    username: options.username,
                    value: options.value,
                    caption: options.caption,
                });
            }
            Ok(sources)
        }
    }

    deserializer.deserialize_option(SourcesVisitor)
}
