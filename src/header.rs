//! C header emission for icon sequences
//!
//! Renders an [`IconSequence`] as a C/C++ header that declares the pixel array
//! and an `IconSequence` initializer pointing at it, for compiling icons into
//! firmware.

use std::fmt::Write as _;
use std::path::Path;
use thiserror::Error;

use crate::sequence::IconSequence;

/// Guard around the struct typedef so several icon headers can be included
/// in one translation unit.
const STRUCT_GUARD: &str = "ICON_SEQUENCE_DEFINED";

const STRUCT_DEFINITION: &str = "typedef struct {
    uint16_t *frames;
    uint16_t width;
    uint16_t height;
    uint16_t count;
} IconSequence;";

/// Error type for header generation
#[derive(Debug, Error)]
pub enum HeaderError {
    /// Name contains nothing usable as a C identifier
    #[error("cannot derive a C identifier from '{0}'")]
    InvalidName(String),
    #[error("failed to write header: {0}")]
    Io(#[from] std::io::Error),
}

/// Options for header rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderOptions {
    /// Icon name; symbols are `icon_{name}` and `icon_{name}_bitmaps`
    pub name: String,
    /// Place the data in flash with `PROGMEM`
    pub progmem: bool,
    /// Emit the `IconSequence` typedef
    pub include_struct: bool,
    /// Wrap the header in `#ifndef ICON_{NAME}_H`
    pub include_guard: bool,
    /// Values per line in the array body. `None` means one frame row per line,
    /// `Some(0)` puts the whole array on one line.
    pub values_per_line: Option<usize>,
}

impl HeaderOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            progmem: true,
            include_struct: true,
            include_guard: false,
            values_per_line: None,
        }
    }
}

/// Derive a C identifier from an arbitrary name.
///
/// Characters outside `[A-Za-z0-9_]` become `_`. The result is only used
/// behind an `icon_` prefix, so it may start with a digit.
///
/// ```
/// use iconseq::header::symbol_name;
///
/// assert_eq!(symbol_name("mario").unwrap(), "mario");
/// assert_eq!(symbol_name("mario.small").unwrap(), "mario_small");
/// assert_eq!(symbol_name("8bit").unwrap(), "8bit");
/// assert!(symbol_name("").is_err());
/// ```
pub fn symbol_name(raw: &str) -> Result<String, HeaderError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(HeaderError::InvalidName(raw.to_string()));
    }

    let name: String =
        trimmed.chars().map(|c| if c.is_ascii_alphanumeric() { c } else { '_' }).collect();

    if name.chars().all(|c| c == '_') {
        return Err(HeaderError::InvalidName(raw.to_string()));
    }
    Ok(name)
}

/// Render the header text for a sequence.
pub fn render_header(seq: &IconSequence, options: &HeaderOptions) -> Result<String, HeaderError> {
    let name = symbol_name(&options.name)?;
    let bitmaps = format!("icon_{}_bitmaps", name);
    let progmem = if options.progmem { " PROGMEM" } else { "" };
    let guard = format!("ICON_{}_H", name.to_ascii_uppercase());

    let mut out = String::new();

    if options.include_guard {
        let _ = writeln!(out, "#ifndef {}\n#define {}\n", guard, guard);
    }

    out.push_str("#include <cstdint>\n");

    if options.include_struct {
        let _ = writeln!(
            out,
            "\n#ifndef {guard}\n#define {guard}\n{def}\n#endif\n",
            guard = STRUCT_GUARD,
            def = STRUCT_DEFINITION
        );
    }

    // No pixel data: zero-length arrays are not valid C/C++, and `frames` is null.
    let frames_ptr = if seq.is_empty() {
        out.push('\n');
        "nullptr".to_string()
    } else {
        let per_line = options.values_per_line.unwrap_or(seq.width() as usize);
        let _ = write!(out, "\nstatic const uint16_t{} {}[] = {{", progmem, bitmaps);
        write_values(&mut out, seq.frames(), per_line);
        out.push_str("};\n");
        format!("(uint16_t *) {}", bitmaps)
    };

    let _ = writeln!(
        out,
        "static const IconSequence{} icon_{} = {{ {}, {}, {}, {} }};",
        progmem,
        name,
        frames_ptr,
        seq.width(),
        seq.height(),
        seq.count()
    );

    if options.include_guard {
        let _ = writeln!(out, "\n#endif // {}", guard);
    }

    Ok(out)
}

fn write_values(out: &mut String, values: &[u16], per_line: usize) {
    if per_line == 0 {
        out.push(' ');
        for v in values {
            let _ = write!(out, "0x{:04X}, ", v);
        }
        return;
    }

    out.push('\n');
    for line in values.chunks(per_line) {
        out.push_str("    ");
        let row: Vec<String> = line.iter().map(|v| format!("0x{:04X}", v)).collect();
        out.push_str(&row.join(", "));
        out.push_str(",\n");
    }
}

/// Render and write a header file, creating parent directories.
pub fn write_header(
    seq: &IconSequence,
    options: &HeaderOptions,
    path: &Path,
) -> Result<(), HeaderError> {
    let text = render_header(seq, options)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, text)?;
    Ok(())
}
