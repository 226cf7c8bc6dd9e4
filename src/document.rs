use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{FileError, FileResult};
use crate::file_handler::FileDialogs;
use crate::surface::{BACKGROUND, Surface};

/// File operations that discard the current drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    New,
    Open,
    Exit,
}

impl PendingAction {
    pub fn prompt_message(&self) -> &'static str {
        match self {
            Self::New => "Do you want to save before starting a new canvas?",
            Self::Open => "Do you want to save before opening another file?",
            Self::Exit => "Do you want to save before exiting?",
        }
    }
}

/// The user's reply to a save prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptAnswer {
    Save,
    Discard,
    Cancel,
}

/// When to ask about saving before discarding the drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PromptPolicy {
    /// Ask only if something was drawn since the last save, open or new.
    #[default]
    DirtyFlag,
    /// New always asks, Open never asks, Exit saves silently to a bound
    /// path and asks otherwise. Unsaved strokes on a bound file are written
    /// on exit without confirmation.
    Legacy,
}

/// What handling a [`PendingAction`] requires before it can run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plan {
    Proceed,
    Prompt,
    SaveThenProceed,
}

impl PromptPolicy {
    pub fn plan(&self, action: PendingAction, document: &Document) -> Plan {
        match self {
            Self::DirtyFlag => {
                if document.is_dirty() {
                    Plan::Prompt
                } else {
                    Plan::Proceed
                }
            }
            Self::Legacy => match action {
                PendingAction::New => Plan::Prompt,
                PendingAction::Open => Plan::Proceed,
                PendingAction::Exit if document.is_bound() => Plan::SaveThenProceed,
                PendingAction::Exit => Plan::Prompt,
            },
        }
    }

    /// Legacy prompts only offer Save and Discard
    pub fn allows_cancel(&self) -> bool {
        matches!(self, Self::DirtyFlag)
    }
}

/// Result of driving a [`PendingAction`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The host must ask the user and call [`Document::answer`]
    NeedsPrompt(PendingAction),
    Completed(PendingAction),
    Aborted,
}

/// The drawing together with its place on disk
#[derive(Debug)]
pub struct Document {
    surface: Surface,
    path: Option<PathBuf>,
    dirty: bool,
    // Bumped whenever the buffer is replaced wholesale
    generation: u64,
}

impl Default for Document {
    fn default() -> Self {
        Self::new(Surface::default())
    }
}

impl Document {
    pub fn new(surface: Surface) -> Self {
        Self {
            surface,
            path: None,
            dirty: false,
            generation: 0,
        }
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Mutable access for in-place painting. Callers mark the document dirty.
    pub fn surface_mut(&mut self) -> &mut Surface {
        &mut self.surface
    }

    /// `None` while untitled
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_bound(&self) -> bool {
        self.path.is_some()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if self.surface.size() != [width, height] {
            self.surface.resize(width, height);
            self.generation += 1;
        }
    }

    /// Blank canvas with no file bound
    pub fn new_file(&mut self) {
        self.surface.clear(BACKGROUND);
        self.path = None;
        self.dirty = false;
        self.generation += 1;
        log::info!("Started a new canvas");
    }

    pub fn open(&mut self, dialogs: &mut dyn FileDialogs) -> FileResult<PathBuf> {
        let path = dialogs.pick_open_path().ok_or(FileError::UserCancelled)?;
        self.open_path(&path)?;
        Ok(path)
    }

    /// Load `path` into the current surface and bind it. The drawing is left
    /// untouched if decoding fails.
    pub fn open_path(&mut self, path: &Path) -> FileResult<()> {
        self.surface.load_from_file(path)?;
        self.path = Some(path.to_path_buf());
        self.dirty = false;
        self.generation += 1;
        Ok(())
    }

    /// Write to the bound path, or ask for one when untitled
    pub fn save(&mut self, dialogs: &mut dyn FileDialogs) -> FileResult<PathBuf> {
        match self.path.clone() {
            Some(path) => {
                self.save_to(&path)?;
                Ok(path)
            }
            None => self.save_as(dialogs),
        }
    }

    pub fn save_as(&mut self, dialogs: &mut dyn FileDialogs) -> FileResult<PathBuf> {
        let path = dialogs.pick_save_path().ok_or(FileError::UserCancelled)?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&mut self, path: &Path) -> FileResult<()> {
        self.surface.save_to_file(path)?;
        self.path = Some(path.to_path_buf());
        self.dirty = false;
        Ok(())
    }

    /// Start `action`, saving or prompting first as `policy` demands
    pub fn request(
        &mut self,
        action: PendingAction,
        policy: PromptPolicy,
        dialogs: &mut dyn FileDialogs,
    ) -> FileResult<Outcome> {
        match policy.plan(action, self) {
            Plan::Proceed => self.perform(action, dialogs),
            Plan::Prompt => Ok(Outcome::NeedsPrompt(action)),
            Plan::SaveThenProceed => {
                self.save(dialogs)?;
                self.perform(action, dialogs)
            }
        }
    }

    /// Continue `action` after the user answered the save prompt.
    ///
    /// A failed or cancelled save aborts the action.
    pub fn answer(
        &mut self,
        action: PendingAction,
        answer: PromptAnswer,
        dialogs: &mut dyn FileDialogs,
    ) -> FileResult<Outcome> {
        match answer {
            PromptAnswer::Save => {
                self.save(dialogs)?;
                self.perform(action, dialogs)
            }
            PromptAnswer::Discard => self.perform(action, dialogs),
            PromptAnswer::Cancel => Ok(Outcome::Aborted),
        }
    }

    fn perform(&mut self, action: PendingAction, dialogs: &mut dyn FileDialogs) -> FileResult<Outcome> {
        match action {
            PendingAction::New => self.new_file(),
            PendingAction::Open => {
                self.open(dialogs)?;
            }
            PendingAction::Exit => log::info!("Exiting"),
        }
        Ok(Outcome::Completed(action))
    }
}
