/// Mode of a tree entry, as written in tree objects and patch headers
#[derive(Debug, Clone, Copy, Eq, Ord, Hash, Default, PartialEq, PartialOrd)]
pub enum FileMode {
    #[default]
    Regular,
    Executable,
    Symlink,
    /// Pointer to a commit of another repository (submodule)
    Gitlink,
    Tree,
    /// Absent side of an added or deleted file
    Missing,
}

impl FileMode {
    pub fn as_str(&self) -> &str {
        match self {
            FileMode::Regular => "100644",
            FileMode::Executable => "100755",
            FileMode::Symlink => "120000",
            FileMode::Gitlink => "160000",
            FileMode::Tree => "040000",
            FileMode::Missing => "000000",
        }
    }

    pub fn as_u32(&self) -> u32 {
        match self {
            FileMode::Regular => 0o100644,
            FileMode::Executable => 0o100755,
            FileMode::Symlink => 0o120000,
            FileMode::Gitlink => 0o160000,
            FileMode::Tree => 0o40000,
            FileMode::Missing => 0,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, FileMode::Missing)
    }

    pub fn is_tree(&self) -> bool {
        matches!(self, FileMode::Tree)
    }

    pub fn is_gitlink(&self) -> bool {
        matches!(self, FileMode::Gitlink)
    }

    /// Whether both modes share git's file type bits
    ///
    /// Regular and executable files are one type; symlinks, gitlinks and
    /// trees are each their own.
    pub fn same_type(&self, other: &FileMode) -> bool {
        self.as_u32() & 0o170000 == other.as_u32() & 0o170000
    }
}

impl TryFrom<u32> for FileMode {
    type Error = anyhow::Error;

    fn try_from(mode: u32) -> anyhow::Result<Self> {
        match mode {
            0o100644 => Ok(FileMode::Regular),
            0o100755 => Ok(FileMode::Executable),
            0o120000 => Ok(FileMode::Symlink),
            0o160000 => Ok(FileMode::Gitlink),
            0o40000 => Ok(FileMode::Tree),
            0 => Ok(FileMode::Missing),
            _ => Err(anyhow::anyhow!("Invalid entry mode {mode:o}")),
        }
    }
}

impl TryFrom<&str> for FileMode {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> anyhow::Result<Self> {
        let mode = u32::from_str_radix(value, 8)
            .map_err(|_| anyhow::anyhow!("Invalid entry mode {value:?}"))?;
        FileMode::try_from(mode)
    }
}

impl std::fmt::Display for FileMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
