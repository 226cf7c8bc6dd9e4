#![allow(dead_code)]

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use pixel_paint::FileDialogs;

static NEXT_DIR: AtomicUsize = AtomicUsize::new(0);

/// Fresh directory under the system temp dir, removed on drop
pub struct TempDir(PathBuf);

impl TempDir {
    pub fn new(name: &str) -> Self {
        let n = NEXT_DIR.fetch_add(1, Ordering::SeqCst);
        let dir = std::env::temp_dir().join(format!(
            "pixel_paint_{}_{}_{}",
            name,
            std::process::id(),
            n
        ));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        Self(dir)
    }

    pub fn join(&self, file: &str) -> PathBuf {
        self.0.join(file)
    }

    pub fn entries(&self) -> Vec<PathBuf> {
        std::fs::read_dir(&self.0)
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect()
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}

/// Dialogs that hand out queued answers and count how often they were shown
#[derive(Default)]
pub struct ScriptedDialogs {
    pub open_answers: VecDeque<Option<PathBuf>>,
    pub save_answers: VecDeque<Option<PathBuf>>,
    pub open_shown: usize,
    pub save_shown: usize,
}

impl ScriptedDialogs {
    pub fn opening(path: PathBuf) -> Self {
        Self {
            open_answers: VecDeque::from([Some(path)]),
            ..Default::default()
        }
    }

    pub fn saving(path: PathBuf) -> Self {
        Self {
            save_answers: VecDeque::from([Some(path)]),
            ..Default::default()
        }
    }

    pub fn cancelling() -> Self {
        Self {
            open_answers: VecDeque::from([None]),
            save_answers: VecDeque::from([None]),
            ..Default::default()
        }
    }
}

impl FileDialogs for ScriptedDialogs {
    fn pick_open_path(&mut self) -> Option<PathBuf> {
        self.open_shown += 1;
        self.open_answers.pop_front().flatten()
    }

    fn pick_save_path(&mut self) -> Option<PathBuf> {
        self.save_shown += 1;
        self.save_answers.pop_front().flatten()
    }
}
