//! Remesh popup dialog state (data only)
//!
//! The UI rendering is in ui/remesh_dialog.rs in the binary crate. The
//! dialog edits the same `RemeshOptions` as the tools panel.

use super::readiness::Blocker;

#[derive(Debug, Default)]
pub struct RemeshDialog {
    pub open: bool,
    /// Why the last open request was refused
    pub refused: Option<Blocker>,
}

impl RemeshDialog {
    /// Open the dialog if the checks passed, otherwise remember why not.
    pub fn request_open(&mut self, readiness: Result<(), Blocker>) -> bool {
        match readiness {
            Ok(()) => {
                self.open = true;
                self.refused = None;
                true
            }
            Err(blocker) => {
                tracing::info!("remesh dialog refused: {blocker}");
                self.open = false;
                self.refused = Some(blocker);
                false
            }
        }
    }

    pub fn close(&mut self) {
        self.open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_and_refuse() {
        let mut dialog = RemeshDialog::default();
        assert!(!dialog.request_open(Err(Blocker::NoMeshSelected)));
        assert!(!dialog.open);
        assert_eq!(dialog.refused, Some(Blocker::NoMeshSelected));

        assert!(dialog.request_open(Ok(())));
        assert!(dialog.open);
        assert!(dialog.refused.is_none());

        dialog.close();
        assert!(!dialog.open);
    }
}
