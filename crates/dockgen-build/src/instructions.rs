//! Minimal Dockerfile instruction scanning.
//!
//! Only what validation needs: logical lines (comments dropped, `\`
//! continuations joined) split into a keyword and its arguments, plus the
//! source list of `COPY`/`ADD`.

/// One logical Dockerfile instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    /// Upper-cased keyword (`FROM`, `COPY`, ...)
    pub keyword: String,
    pub args: String,
}

/// Split Dockerfile text into instructions.
pub fn parse(dockerfile: &str) -> Vec<Instruction> {
    let mut instructions = Vec::new();
    let mut pending = String::new();

    for line in dockerfile.lines() {
        let trimmed = line.trim();
        // Comment and blank lines are dropped even inside a continuation.
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        match trimmed.strip_suffix('\\') {
            Some(head) => {
                pending.push_str(head);
                pending.push(' ');
            }
            None => {
                pending.push_str(trimmed);
                instructions.extend(split(&pending));
                pending.clear();
            }
        }
    }
    instructions.extend(split(&pending));

    instructions
}

fn split(line: &str) -> Option<Instruction> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let (keyword, args) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    Some(Instruction {
        keyword: keyword.to_ascii_uppercase(),
        args: args.trim().to_owned(),
    })
}

/// Whether the Dockerfile declares at least one base image.
pub fn has_from(dockerfile: &str) -> bool {
    parse(dockerfile)
        .iter()
        .any(|i| i.keyword == "FROM" && !i.args.is_empty())
}

/// Sources and flags of a `COPY` or `ADD` instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopySpec {
    /// Copies from another build stage or image (`--from=`).
    pub from_stage: bool,
    pub sources: Vec<String>,
}

impl Instruction {
    /// Parse this instruction as a file copy, if it is one.
    ///
    /// Returns `None` for other keywords and for copies with no destination.
    pub fn copy_spec(&self) -> Option<CopySpec> {
        if self.keyword != "COPY" && self.keyword != "ADD" {
            return None;
        }

        let mut rest = self.args.as_str();
        let mut from_stage = false;
        while let Some(flagged) = rest.strip_prefix("--") {
            let (flag, tail) = flagged
                .split_once(char::is_whitespace)
                .unwrap_or((flagged, ""));
            if flag.starts_with("from=") {
                from_stage = true;
            }
            rest = tail.trim_start();
        }

        let mut operands = json_operands(rest).unwrap_or_else(|| {
            rest.split_whitespace().map(str::to_owned).collect()
        });
        // The last operand is the destination.
        operands.pop()?;
        if operands.is_empty() {
            return None;
        }

        Some(CopySpec {
            from_stage,
            sources: operands,
        })
    }
}

/// Exec-form operands: `COPY ["src", "dest"]`.
fn json_operands(rest: &str) -> Option<Vec<String>> {
    if !rest.starts_with('[') {
        return None;
    }
    // arch-lint: allow(no-silent-result-drop) reason="a bracket that is not a JSON array is parsed as shell form instead"
    serde_json::from_str(rest).ok()
}
