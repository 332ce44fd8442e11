//! The text being paged: a file, stdin, or a generated demo building.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

/// Lines of text plus a title for the pane border.
#[derive(Debug, Clone)]
pub struct Page {
    pub title: String,
    pub lines: Vec<String>,
}

impl Page {
    /// Load `path`, or stdin when `path` is `-`.  Tabs are expanded to four
    /// spaces so column math in the widget stays simple.
    pub fn load(path: &Path) -> Result<Self> {
        let (title, raw) = if path == Path::new("-") {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            ("stdin".to_string(), buf)
        } else {
            let bytes = std::fs::read(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            (path.display().to_string(), String::from_utf8_lossy(&bytes).into_owned())
        };
        Ok(Self::from_text(title, &raw))
    }

    pub fn from_text(title: impl Into<String>, text: &str) -> Self {
        let mut lines: Vec<String> = text.lines().map(|l| l.replace('\t', "    ")).collect();
        if lines.is_empty() {
            lines.push(String::new());
        }
        Self {
            title: title.into(),
            lines,
        }
    }

    /// A tall building to ride down and back up: `floors` storeys drawn
    /// top floor first, lobby at the bottom.
    pub fn demo(floors: usize) -> Self {
        const SHAFT: usize = 5;
        const ROOMS: usize = 25;
        const INNER: usize = SHAFT + 1 + ROOMS;

        let floors = floors.max(1);
        let windows = "▢ ▢ ▢ ▢ ▢ ▢ ▢ ▢ ▢ ▢";
        let mut lines = vec![
            format!("  ╔{}╗", "═".repeat(INNER)),
            format!("  ║{:^INNER$}║", "ROOF  ·  observation"),
            format!("  ╚{}╝", "═".repeat(INNER)),
        ];
        for floor in (1..=floors).rev() {
            lines.push(format!("  │{floor:^SHAFT$}│{windows:^ROOMS$}│"));
            lines.push(format!("  │{:SHAFT$}│{:ROOMS$}│", "", ""));
        }
        lines.push(format!("  │{:^SHAFT$}│{:^ROOMS$}│", "LOBBY", "▢ ▢ ▢ ▢ ┌───┐ ▢ ▢ ▢ ▢"));
        lines.push(format!("  └{}┴{}┘", "─".repeat(SHAFT), "─".repeat(ROOMS)));
        lines.push(String::new());
        lines.push("  You are in the lobby.  Press the button to go up.".to_string());
        Self {
            title: format!("demo tower · {floors} floors"),
            lines,
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_text_expands_tabs_and_never_empty() {
        let page = Page::from_text("t", "a\tb\nc");
        assert_eq!(page.lines, vec!["a    b", "c"]);

        let empty = Page::from_text("e", "");
        assert_eq!(empty.len(), 1);
    }

    #[test]
    fn demo_has_two_rows_per_floor_plus_chrome() {
        let page = Page::demo(10);
        assert_eq!(page.len(), 3 + 10 * 2 + 4);
        assert!(page.lines[3].contains(" 10 "));
        assert!(page.lines.iter().any(|l| l.contains("LOBBY")));
    }

    #[test]
    fn demo_tower_rows_line_up() {
        let page = Page::demo(12);
        let tower: Vec<&String> = page.lines.iter().take_while(|l| !l.is_empty()).collect();
        let width = tower[0].chars().count();
        for line in &tower {
            assert_eq!(line.chars().count(), width, "ragged row: {line:?}");
        }
    }

    #[test]
    fn load_reads_files() {
        let path = std::env::temp_dir().join(format!("elevator-page-{}.txt", std::process::id()));
        std::fs::write(&path, "one\ntwo\nthree\n").unwrap();
        let page = Page::load(&path).unwrap();
        assert_eq!(page.len(), 3);
        assert!(page.title.ends_with(".txt"));
        let _ = std::fs::remove_file(&path);

        assert!(Page::load(Path::new("/no/such/file.txt")).is_err());
    }
}
