use std::fmt;

/// A normalized absolute path inside the virtual namespace.
///
/// Always starts with `/`, never ends with one (except the root itself) and
/// never contains empty, `.` or `..` segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VirtualPath(String);

impl VirtualPath {
    pub fn root() -> Self {
        Self("/".to_string())
    }

    /// Normalizes `raw`: repeated and trailing slashes are dropped, `.` is
    /// skipped and `..` pops one segment (stopping at the root). A missing
    /// leading slash is implied.
    pub fn new(raw: &str) -> Self {
        let mut segments: Vec<&str> = Vec::new();
        for segment in raw.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    segments.pop();
                }
                _ => segments.push(segment),
            }
        }
        Self::from_segments(&segments)
    }

    pub(crate) fn from_segments(segments: &[&str]) -> Self {
        Self(format!("/{}", segments.join("/")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }

    pub fn join(&self, name: &str) -> Self {
        Self::new(&format!("{}/{}", self.0, name))
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|segment| !segment.is_empty())
    }

    pub fn file_name(&self) -> Option<&str> {
        self.segments().last()
    }

    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        let segments: Vec<&str> = self.segments().collect();
        Some(Self::from_segments(&segments[..segments.len() - 1]))
    }
}

impl fmt::Display for VirtualPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VirtualPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for VirtualPath {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}
