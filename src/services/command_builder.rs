use crate::config::Settings;
use crate::services::selection::SelectedEntry;
use crate::utils::win_path;

/// Recurse into subdirectories, including empty ones
const FLAG_RECURSIVE: &str = "/e";

/// One robocopy call for one selected entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncInvocation {
    pub program: String,
    pub source_dir: String,
    pub destination_dir: String,
    /// File name filter, set when a single file is synced
    pub file_filter: Option<String>,
    pub is_dir: bool,
    pub flags: Vec<String>,
}

/// Build the invocation for `entry` with `target_root` as the other pane.
///
/// Directories are copied as whole subtrees into the same-named directory
/// under the target; files are copied by running robocopy on their
/// containing directory with the file name as filter.
pub fn build_invocation(
    entry: &SelectedEntry,
    target_root: &str,
    settings: &Settings,
) -> SyncInvocation {
    let threads_flag = format!("/MT:{}", settings.effective_threads());
    let name = win_path::file_name(&entry.path);

    if entry.is_dir {
        let destination_dir = match name {
            Some(name) => win_path::join(target_root, name),
            None => win_path::trim_trailing_separators(target_root).to_string(),
        };
        SyncInvocation {
            program: settings.robocopy_path.clone(),
            source_dir: entry.path.clone(),
            destination_dir,
            file_filter: None,
            is_dir: true,
            flags: vec![FLAG_RECURSIVE.to_string(), threads_flag],
        }
    } else {
        SyncInvocation {
            program: settings.robocopy_path.clone(),
            source_dir: win_path::parent(&entry.path).to_string(),
            destination_dir: win_path::trim_trailing_separators(target_root).to_string(),
            file_filter: Some(name.unwrap_or(&entry.path).to_string()),
            is_dir: false,
            flags: vec![threads_flag],
        }
    }
}

/// Build one invocation per entry, keeping selection order
pub fn build_all(
    entries: &[SelectedEntry],
    target_root: &str,
    settings: &Settings,
) -> Vec<SyncInvocation> {
    entries
        .iter()
        .map(|entry| build_invocation(entry, target_root, settings))
        .collect()
}

fn quote(s: &str) -> String {
    format!("\"{}\"", s)
}

impl SyncInvocation {
    /// Arguments as passed to the process, without the program
    pub fn args(&self) -> Vec<String> {
        let mut args = vec![self.source_dir.clone(), self.destination_dir.clone()];
        if let Some(filter) = &self.file_filter {
            args.push(filter.clone());
        }
        args.extend(self.flags.iter().cloned());
        args
    }

    /// Quoted command line as written to the logs
    pub fn command_line(&self) -> String {
        let program = if self.program.contains(char::is_whitespace) {
            quote(&self.program)
        } else {
            self.program.clone()
        };
        let mut parts = vec![program, quote(&self.source_dir), quote(&self.destination_dir)];
        if let Some(filter) = &self.file_filter {
            parts.push(quote(filter));
        }
        parts.extend(self.flags.iter().cloned());
        parts.join(" ")
    }

    /// Where the synced entry ends up
    pub fn destination_path(&self) -> String {
        match &self.file_filter {
            Some(filter) => win_path::join(&self.destination_dir, filter),
            None => self.destination_dir.clone(),
        }
    }

    /// Name shown in status messages
    pub fn display_name(&self) -> &str {
        match &self.file_filter {
            Some(filter) => filter,
            None => win_path::display_name(&self.source_dir),
        }
    }
}
