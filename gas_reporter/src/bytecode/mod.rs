//!
//! The library-link agnostic bytecode matcher.
//!


use once_cell::sync::Lazy;
use regex::Regex;
use regex::RegexBuilder;

///
/// The library link placeholders found in unlinked compiler output.
///
/// The first alternative covers both `__LibName_____` and `__$hash$__` markers, which
/// are always 40 characters wide, that is, exactly the width of the linked address.
/// The second one covers the library self-address `PUSH20` that is patched on deploy.
///
static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"__.{38}|73(?:f{40}|0{40})").expect("Always valid"));

///
/// The bytecode pattern segment.
///
#[derive(Debug)]
enum Segment<'a> {
    /// Characters that must be matched exactly.
    Literal(&'a str),
    /// The number of arbitrary hexadecimal characters.
    Wildcard(usize),
}

///
/// The reference bytecode compiled into a matching pattern.
///
#[derive(Debug, Clone)]
pub struct BytecodePattern {
    /// The anchored pattern.
    regex: Regex,
    /// The number of observed characters the pattern covers.
    length: usize,
    /// Whether the pattern only covers a prefix of the reference.
    is_truncated: bool,
}

impl BytecodePattern {
    ///
    /// The maximum number of reference characters turned into the pattern.
    ///
    /// Longer references are truncated, so matching degrades to a prefix comparison.
    ///
    pub const MAX_PATTERN_LENGTH: usize = 32767;

    /// The compiled regular expression size limit.
    const REGEX_SIZE_LIMIT: usize = 64 * 1024 * 1024;

    ///
    /// Compiles the reference bytecode, which may carry library placeholders.
    ///
    pub fn new(reference: &str) -> anyhow::Result<Self> {
        let reference = crate::utils::hex_normalized(reference);

        let mut segments = Vec::new();
        let mut offset = 0;
        for placeholder in PLACEHOLDER.find_iter(reference.as_str()) {
            if placeholder.start() > offset {
                segments.push(Segment::Literal(&reference[offset..placeholder.start()]));
            }
            segments.push(Segment::Wildcard(placeholder.as_str().chars().count()));
            offset = placeholder.end();
        }
        if offset < reference.len() {
            segments.push(Segment::Literal(&reference[offset..]));
        }

        let mut pattern = String::with_capacity(reference.len() + 1);
        pattern.push('^');
        let mut length = 0;
        let mut is_truncated = false;
        for segment in segments.into_iter() {
            let remaining = Self::MAX_PATTERN_LENGTH - length;
            if remaining == 0 {
                is_truncated = true;
                break;
            }

            match segment {
                Segment::Literal(literal) => {
                    let end = match literal.char_indices().nth(remaining) {
                        Some((end, _)) => {
                            is_truncated = true;
                            end
                        }
                        None => literal.len(),
                    };
                    let literal = &literal[..end];
                    pattern.push_str(regex::escape(literal).as_str());
                    length += literal.chars().count();
                }
                Segment::Wildcard(width) => {
                    if width > remaining {
                        is_truncated = true;
                    }
                    let width = width.min(remaining);
                    pattern.push_str(format!("[0-9a-f]{{{width}}}").as_str());
                    length += width;
                }
            }
        }

        let regex = RegexBuilder::new(pattern.as_str())
            .size_limit(Self::REGEX_SIZE_LIMIT)
            .build()
            .map_err(|error| anyhow::anyhow!("Bytecode pattern compiling error: {error}"))?;

        Ok(Self {
            regex,
            length,
            is_truncated,
        })
    }

    ///
    /// Whether the observed hexadecimal bytecode matches the pattern.
    ///
    /// The observed bytecode may be longer than the pattern, e.g. carry constructor arguments.
    ///
    pub fn matches(&self, observed: &str) -> bool {
        self.regex
            .is_match(crate::utils::hex_normalized(observed).as_str())
    }

    ///
    /// Whether the reference was empty, which is the case for interfaces and abstract contracts.
    ///
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    ///
    /// Whether the pattern only covers a prefix of the reference.
    ///
    pub fn is_truncated(&self) -> bool {
        self.is_truncated
    }
}

///
/// Whether the observed bytecode matches the reference bytecode, ignoring library links.
///
pub fn matches(observed: &str, reference: &str) -> bool {
    BytecodePattern::new(reference)
        .map(|pattern| pattern.matches(observed))
        .unwrap_or_default()
}
