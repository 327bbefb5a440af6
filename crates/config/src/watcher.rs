use std::path::{Path, PathBuf};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

/// Watches the config file for changes and sends a notification on every write.
///
/// The watch is placed on the parent directory, not the file itself: most
/// editors save via write-to-temp + rename, which silently breaks a watch
/// on the original inode. Events are filtered back down to the one file.
///
/// # Example
/// ```no_run
/// # use dash_config::ConfigWatcher;
/// # async fn example() {
/// let (_, mut rx) = ConfigWatcher::spawn("/home/user/.config/dash/config.toml");
/// while rx.recv().await.is_some() {
///     println!("config changed — reloading");
/// }
/// # }
/// ```
pub struct ConfigWatcher {
    path: PathBuf,
}

impl ConfigWatcher {
    /// Spawn a filesystem watcher for `path`.
    /// Returns the watcher handle and a receiver that fires on every detected change.
    pub fn spawn(path: impl AsRef<Path>) -> (Self, mpsc::Receiver<()>) {
        let (tx, rx) = mpsc::channel(1);
        let path = path.as_ref().to_path_buf();
        let watcher = Self { path: path.clone() };

        tokio::spawn(watch_loop(path, tx));

        (watcher, rx)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

async fn watch_loop(path: PathBuf, tx: mpsc::Sender<()>) {
    use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
    use std::time::Duration;
    use tokio::sync::mpsc as async_mpsc;

    let Some(dir) = path.parent().map(Path::to_path_buf) else {
        error!("Config path '{}' has no parent directory", path.display());
        return;
    };
    if !dir.exists() {
        warn!(
            "Config directory '{}' does not exist; live reload disabled",
            dir.display()
        );
        return;
    }

    let (sync_tx, mut sync_rx) = async_mpsc::channel::<notify::Result<Event>>(16);

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = sync_tx.blocking_send(res);
        },
        Config::default().with_poll_interval(Duration::from_secs(2)),
    ) {
        Ok(w) => w,
        Err(e) => {
            error!("Failed to create filesystem watcher: {e}");
            return;
        }
    };

    if let Err(e) = watcher.watch(&dir, RecursiveMode::NonRecursive) {
        error!("Failed to watch '{}': {e}", dir.display());
        return;
    }

    info!("Watching config file: {}", path.display());

    while let Some(event) = sync_rx.recv().await {
        match event {
            Ok(e) => {
                use notify::EventKind::*;
                let touches_config = e.paths.iter().any(|p| p == &path);
                if touches_config && matches!(e.kind, Modify(_) | Create(_)) {
                    if tx.send(()).await.is_err() {
                        break; // receiver dropped
                    }
                }
            }
            Err(e) => warn!("Watcher error: {e}"),
        }
    }
}
