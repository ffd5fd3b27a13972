use std::sync::Arc;

type Pos = usize;

/// A [`SourceInfo`] remembers where a netlist or testbench came from.
/// It converts byte offsets reported by the parsers into a [`LineCol`].
#[derive(Clone, Debug)]
pub struct SourceInfo {
    source: Source,
    linelens: LineLens,
}

impl SourceInfo {
    pub fn unknown() -> SourceInfo {
        SourceInfo {
            source: Source::Unknown,
            linelens: LineLens::from(""),
        }
    }

    pub fn from_file(filepath: &std::path::Path, contents: &str) -> SourceInfo {
        SourceInfo {
            source: Source::File(Arc::new(filepath.to_owned())),
            linelens: LineLens::from(contents),
        }
    }

    pub fn from_string(contents: &str) -> SourceInfo {
        SourceInfo {
            source: Source::String(Arc::new(contents.to_owned())),
            linelens: LineLens::from(contents),
        }
    }
}

#[derive(Clone, Debug)]
pub enum Source {
    File(Arc<std::path::PathBuf>),
    String(Arc<String>),
    Unknown,
}

/// A line and column pair. Both are 1-based when displayed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineCol(usize, usize);

impl LineCol {
    pub fn line(&self) -> usize {
        self.0 + 1
    }

    pub fn col(&self) -> usize {
        self.1 + 1
    }
}

impl std::fmt::Display for LineCol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}:{}", self.line(), self.col())
    }
}

/// A [`Loc`] is the span of a declaration or testbench item.
#[derive(Clone)]
pub struct Loc {
    start: Pos,
    end: Pos,
    source_info: SourceInfo,
}

impl std::fmt::Debug for Loc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        match &self.source_info.source {
            Source::File(path) => write!(f, "[{}-{}:{:?}]", self.start(), self.end(), path),
            Source::String(s) => write!(f, "[{}-{}:{:?}]", self.start(), self.end(), String::from_utf8_lossy(&s.as_bytes()[self.start..self.end])),
            Source::Unknown => write!(f, "[{}-{}]", self.start(), self.end()),
        }
    }
}

impl std::fmt::Display for Loc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        match &self.source_info.source {
            Source::File(path) => write!(f, "{}:{}", path.display(), self.start()),
            Source::String(_s) => write!(f, "{}", self.start()),
            Source::Unknown => write!(f, "?"),
        }
    }
}

impl Loc {
    /// Used for items that were built in code rather than parsed.
    pub fn unknown() -> Loc {
        Loc {
            start: 0,
            end: 0,
            source_info: SourceInfo::unknown(),
        }
    }

    pub fn from(source_info: &SourceInfo, start: usize, end: usize) -> Loc {
        Loc {
            start,
            end,
            source_info: source_info.clone(),
        }
    }

    pub fn start(&self) -> LineCol {
        self.source_info.linelens.linecol(self.start)
    }

    pub fn end(&self) -> LineCol {
        self.source_info.linelens.linecol(self.end)
    }
}

/// Anything that remembers where it was declared.
pub trait HasLoc {
    fn loc(&self) -> Loc;
}

#[derive(Clone, Debug)]
struct LineLens(Vec<usize>);

impl LineLens {
    fn from(text: &str) -> LineLens {
        let mut lens = vec![];
        for line in text.split('\n') {
            lens.push(line.len() + 1);
        }
        LineLens(lens)
    }

    fn linecol(&self, pos: Pos) -> LineCol {
        let mut line = 0;
        let mut col = pos;
        for line_len in &self.0 {
            if col >= *line_len {
                col -= *line_len;
                line += 1;
            } else {
                break
            }
        }
        LineCol(line, col)
    }
}

#[test]
fn linelens() {
    let text = "clock : controlled
A : controlled
q : not(A)";

    let linelens = LineLens::from(text);
    assert_eq!(linelens.linecol(0).to_string(), "1:1".to_string());
    assert_eq!(linelens.linecol(6).to_string(), "1:7".to_string());
    assert_eq!(linelens.linecol(18).to_string(), "1:19".to_string());
    assert_eq!(linelens.linecol(19).to_string(), "2:1".to_string());
    assert_eq!(linelens.linecol(34).to_string(), "3:1".to_string());
    assert_eq!(linelens.linecol(38).to_string(), "3:5".to_string());
}
