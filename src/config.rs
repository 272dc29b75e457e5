//! Host-facing options for the syntax layer.

use serde::{Deserialize, Serialize};

use crate::err_msg;
use crate::hygiene::{Deferred, Eager, Gensym, WrapStrategy, DEFAULT_GENSYM_STEM};
use crate::StxResult;

static DEFERRED: Deferred = Deferred;
static EAGER: Eager = Eager;

/// Which [`WrapStrategy`] applies marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WrapMode {
    #[default]
    Deferred,
    Eager,
}

/// Options a host embeds in its own configuration.
///
/// # Examples
///
/// ```rust
/// use sutra_stx::{StxOptions, WrapMode};
/// let opts = StxOptions::from_json(r#"{ "wrap": "eager" }"#).unwrap();
/// assert_eq!(opts.wrap, WrapMode::Eager);
/// assert_eq!(opts.gensym_stem, "g");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StxOptions {
    pub wrap: WrapMode,
    /// Stem for generated identifiers with no usable template name.
    pub gensym_stem: String,
}

impl Default for StxOptions {
    fn default() -> Self {
        StxOptions {
            wrap: WrapMode::Deferred,
            gensym_stem: DEFAULT_GENSYM_STEM.to_string(),
        }
    }
}

impl StxOptions {
    pub fn from_json(text: &str) -> StxResult<Self> {
        serde_json::from_str(text).map_err(|e| {
            err_msg!(InvalidStructure, "cannot read syntax options: {}", e).with_cause(e)
        })
    }

    pub fn strategy(&self) -> &'static dyn WrapStrategy {
        match self.wrap {
            WrapMode::Deferred => &DEFERRED,
            WrapMode::Eager => &EAGER,
        }
    }

    /// A fresh counter for one compilation process using these options.
    pub fn gensym(&self) -> Gensym {
        Gensym::with_stem(self.gensym_stem.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorType;

    #[test]
    fn defaults_to_deferred_wrapping() {
        let opts = StxOptions::from_json("{}").unwrap();
        assert_eq!(opts, StxOptions::default());
        assert_eq!(opts.strategy().name(), "deferred");
    }

    #[test]
    fn eager_mode_selects_eager_strategy() {
        let opts = StxOptions::from_json(r#"{"wrap":"eager","gensym_stem":"tmp"}"#).unwrap();
        assert_eq!(opts.strategy().name(), "eager");
        assert_eq!(opts.gensym().fresh_symbol("").name(), "tmp");
    }

    #[test]
    fn malformed_options_are_invalid_structure() {
        let err = StxOptions::from_json(r#"{"wrap":"sideways"}"#).unwrap_err();
        assert_eq!(err.error_type(), ErrorType::InvalidStructure);
        assert!(err.message().contains("cannot read syntax options"));
    }
}
