use indicatif::{ProgressBar, ProgressState, ProgressStyle};
use pdbsplit::engine::progress::{Progress, ProgressCallback};
use std::sync::{Arc, Mutex};
use tracing::warn;

#[derive(Clone)]
pub struct CliProgressHandler {
    pb: Arc<Mutex<ProgressBar>>,
    failed: Arc<Mutex<u64>>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        Self::with_target(indicatif::ProgressDrawTarget::stderr())
    }

    fn with_target(target: indicatif::ProgressDrawTarget) -> Self {
        let pb = ProgressBar::new(0).with_style(Self::bar_style());
        pb.set_draw_target(target);
        pb.finish_and_clear();

        Self {
            pb: Arc::new(Mutex::new(pb)),
            failed: Arc::new(Mutex::new(0)),
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let pb_clone = self.pb.clone();
        let failed_clone = self.failed.clone();

        Box::new(move |progress: Progress| {
            let Ok(mut pb_guard) = pb_clone.lock() else {
                warn!("Progress bar mutex was poisoned. Cannot update progress.");
                return;
            };

            match progress {
                Progress::BatchStart { total, skipped } => {
                    pb_guard.reset();
                    pb_guard.set_length(total);
                    pb_guard.set_position(0);
                    pb_guard.set_style(Self::bar_style());
                    if let Ok(mut failed) = failed_clone.lock() {
                        *failed = 0;
                    }
                    if skipped > 0 {
                        pb_guard.set_message(format!("{} done earlier", skipped));
                    } else {
                        pb_guard.set_message("Segmenting");
                    }
                }
                Progress::FileFinished { file_id, succeeded } => {
                    if !succeeded {
                        if let Ok(mut failed) = failed_clone.lock() {
                            *failed += 1;
                            pb_guard.set_message(format!("{} failed", *failed));
                        }
                        pb_guard.println(format!("  ✗ {}", file_id));
                    }
                    pb_guard.inc(1);
                }
                Progress::Checkpoint { completed } => {
                    pb_guard.println(format!("  Checkpoint: {} files recorded", completed));
                }
                Progress::BatchFinish => {
                    if pb_guard.position() < pb_guard.length().unwrap_or(0) {
                        pb_guard.set_position(pb_guard.length().unwrap_or(0));
                    }
                    pb_guard.finish_with_message("✓ Done");
                }
                Progress::Message(msg) => {
                    if !pb_guard.is_finished() {
                        pb_guard.println(format!("  {}", msg));
                    } else {
                        pb_guard.set_message(msg);
                    }
                }
            }
        })
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template("{msg:<20} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .expect("Failed to create bar style template")
            .with_key(
                "eta",
                |state: &ProgressState, w: &mut dyn std::fmt::Write| {
                    let _ = write!(w, "{:.1}s", state.eta().as_secs_f64());
                },
            )
            .progress_chars("##-")
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indicatif::ProgressDrawTarget;
    use std::thread;

    fn hidden_handler() -> CliProgressHandler {
        CliProgressHandler::with_target(ProgressDrawTarget::hidden())
    }

    #[test]
    fn handler_initializes_in_a_clean_state() {
        let handler = hidden_handler();
        let pb = handler.pb.lock().unwrap();
        assert_eq!(pb.length(), Some(0));
        assert!(pb.is_finished());
    }

    #[test]
    fn callback_tracks_batch_progress() {
        let handler = hidden_handler();
        let callback = handler.get_callback();

        callback(Progress::BatchStart {
            total: 3,
            skipped: 2,
        });
        {
            let pb = handler.pb.lock().unwrap();
            assert_eq!(pb.length(), Some(3));
            assert_eq!(pb.position(), 0);
            assert_eq!(pb.message(), "2 done earlier");
            assert!(!pb.is_finished());
        }

        callback(Progress::FileFinished {
            file_id: "1abc".into(),
            succeeded: true,
        });
        callback(Progress::FileFinished {
            file_id: "2bad".into(),
            succeeded: false,
        });
        {
            let pb = handler.pb.lock().unwrap();
            assert_eq!(pb.position(), 2);
            assert_eq!(pb.message(), "1 failed");
        }
        assert_eq!(*handler.failed.lock().unwrap(), 1);

        callback(Progress::BatchFinish);
        {
            let pb = handler.pb.lock().unwrap();
            assert!(pb.is_finished());
            assert_eq!(pb.position(), 3);
            assert_eq!(pb.message(), "✓ Done");
        }
    }

    #[test]
    fn new_batch_resets_failure_count() {
        let handler = hidden_handler();
        let callback = handler.get_callback();

        callback(Progress::BatchStart {
            total: 1,
            skipped: 0,
        });
        callback(Progress::FileFinished {
            file_id: "x".into(),
            succeeded: false,
        });
        callback(Progress::BatchStart {
            total: 1,
            skipped: 0,
        });

        assert_eq!(*handler.failed.lock().unwrap(), 0);
        assert_eq!(handler.pb.lock().unwrap().message(), "Segmenting");
    }

    #[test]
    fn callback_is_thread_safe() {
        let handler = hidden_handler();
        let callback = handler.get_callback();

        thread::spawn(move || {
            callback(Progress::BatchStart {
                total: 1,
                skipped: 0,
            });
            callback(Progress::FileFinished {
                file_id: "1abc".into(),
                succeeded: true,
            });
            callback(Progress::BatchFinish);
        })
        .join()
        .unwrap();

        let pb = handler.pb.lock().unwrap();
        assert!(pb.is_finished());
        assert_eq!(pb.message(), "✓ Done");
    }
}
