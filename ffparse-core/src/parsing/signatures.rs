// ============================================================================
// ffparse-core/src/parsing/signatures.rs
// ============================================================================
//
// ERROR SIGNATURES: Recognizing Classified Errors in Tool Output
//
// A signature pairs a literal trigger prefix with an error kind and a list of
// sub-patterns. When a line starts with the trigger, the line is turned into a
// `ToolError` whose positional arguments are the trigger followed by the text
// of every sub-pattern that matched.
//
// KEY COMPONENTS:
// - ErrorSignature: one trigger/kind/sub-pattern rule
// - SignatureSet: ordered collection, first match wins
// - Built-in signatures for the errors ffmpeg reports most often

// ---- Internal crate imports ----
use crate::error::{CoreError, CoreResult, ErrorKind, ToolError};

// ---- External crate imports ----
use once_cell::sync::Lazy;
use regex::Regex;

// ============================================================================
// BUILT-IN PATTERNS
// ============================================================================

static ALREADY_EXISTS_GUARD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"File .* already exists").expect("Valid regex pattern"));

static ENCODER_CODEC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(codec)\s([\w]+)").expect("Valid regex pattern"));

static ENCODER_FORMAT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(format)\s([\w]+)").expect("Valid regex pattern"));

static DURATION_TIMESTAMP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d\d:\d\d:\d\d:\d\d").expect("Valid regex pattern"));

pub const ALREADY_EXISTS_TRIGGER: &str = "File ";
pub const ENCODER_SELECTION_TRIGGER: &str = "Automatic encoder selection failed";
pub const INVALID_DURATION_TRIGGER: &str = "Invalid duration specification";

// ============================================================================
// ERROR SIGNATURE
// ============================================================================

/// A line-prefix rule producing a classified error.
#[derive(Debug, Clone)]
pub struct ErrorSignature {
    trigger: String,
    kind: ErrorKind,
    patterns: Vec<Regex>,
    guard: Option<Regex>,
}

impl ErrorSignature {
    /// Creates a signature, compiling every sub-pattern up front.
    pub fn new<I, P>(trigger: impl Into<String>, kind: ErrorKind, patterns: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<str>,
    {
        let trigger = trigger.into();
        let patterns = patterns
            .into_iter()
            .map(|pattern| compile(&trigger, pattern.as_ref()))
            .collect::<CoreResult<Vec<_>>>()?;
        Ok(Self {
            trigger,
            kind,
            patterns,
            guard: None,
        })
    }

    /// Additionally requires the whole line to match `pattern` before the
    /// signature fires.
    pub fn requiring(mut self, pattern: &str) -> CoreResult<Self> {
        self.guard = Some(compile(&self.trigger, pattern)?);
        Ok(self)
    }

    /// `File 'out.mkv' already exists. Overwrite? [y/N]`
    pub fn already_exists() -> Self {
        Self {
            trigger: ALREADY_EXISTS_TRIGGER.to_string(),
            kind: ErrorKind::OutputAlreadyExists,
            patterns: Vec::new(),
            guard: Some(ALREADY_EXISTS_GUARD.clone()),
        }
    }

    /// `Automatic encoder selection failed for output stream #0:0. Default
    /// encoder for format avi (codec mpeg4) is probably disabled.`
    pub fn encoder_selection_failed() -> Self {
        Self {
            trigger: ENCODER_SELECTION_TRIGGER.to_string(),
            kind: ErrorKind::EncoderSelectionFailed,
            patterns: vec![ENCODER_CODEC.clone(), ENCODER_FORMAT.clone()],
            guard: None,
        }
    }

    /// `Invalid duration specification for ss: 00:00:01:00`
    pub fn invalid_duration() -> Self {
        Self {
            trigger: INVALID_DURATION_TRIGGER.to_string(),
            kind: ErrorKind::InvalidDuration,
            patterns: vec![DURATION_TIMESTAMP.clone()],
            guard: None,
        }
    }

    pub fn trigger(&self) -> &str {
        &self.trigger
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// True when `line` starts with the trigger and satisfies the guard.
    pub fn matches(&self, line: &str) -> bool {
        line.starts_with(&self.trigger)
            && self.guard.as_ref().is_none_or(|guard| guard.is_match(line))
    }

    /// Positional arguments for `line`: the trigger, then the first whole
    /// match of each sub-pattern that matched.
    pub fn captures(&self, line: &str) -> Vec<String> {
        std::iter::once(self.trigger.clone())
            .chain(
                self.patterns
                    .iter()
                    .filter_map(|pattern| pattern.find(line))
                    .map(|m| m.as_str().to_string()),
            )
            .collect()
    }

    fn to_error(&self, line: &str) -> ToolError {
        ToolError::new(self.kind.clone(), line, self.captures(line))
    }
}

fn compile(trigger: &str, pattern: &str) -> CoreResult<Regex> {
    Regex::new(pattern).map_err(|source| CoreError::InvalidSignature {
        trigger: trigger.to_string(),
        pattern: pattern.to_string(),
        source,
    })
}

// ============================================================================
// SIGNATURE SET
// ============================================================================

/// Ordered set of signatures tested against every output line.
#[derive(Debug, Clone, Default)]
pub struct SignatureSet {
    signatures: Vec<ErrorSignature>,
}

impl SignatureSet {
    /// A set that classifies nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Signatures relevant to operations that write an output file.
    pub fn output_errors() -> Self {
        Self::empty().with(ErrorSignature::already_exists())
    }

    /// Signatures relevant to transcoding and cutting.
    pub fn video_errors() -> Self {
        Self::output_errors()
            .with(ErrorSignature::encoder_selection_failed())
            .with(ErrorSignature::invalid_duration())
    }

    pub fn push(&mut self, signature: ErrorSignature) {
        self.signatures.push(signature);
    }

    pub fn with(mut self, signature: ErrorSignature) -> Self {
        self.push(signature);
        self
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ErrorSignature> {
        self.signatures.iter()
    }

    /// Classifies one output line. The first matching signature wins.
    pub fn classify(&self, line: &str) -> Option<ToolError> {
        self.signatures
            .iter()
            .find(|signature| signature.matches(line))
            .map(|signature| signature.to_error(line))
    }
}

impl FromIterator<ErrorSignature> for SignatureSet {
    fn from_iter<T: IntoIterator<Item = ErrorSignature>>(iter: T) -> Self {
        Self {
            signatures: iter.into_iter().collect(),
        }
    }
}
