use std::io;
use std::process::{Child, Command, Stdio};

use log::{info, warn};

/// Best-effort screen wake lock. Absence of the capability never blocks or
/// alters countdown behavior; failures are logged and swallowed.
pub trait WakeLock {
    /// Try to take the lock. Returns whether it is held afterwards.
    fn acquire(&mut self) -> bool;
    fn release(&mut self);
    fn is_held(&self) -> bool;
}

/// Wake lock backed by an OS idle-inhibitor child process that stays alive
/// for as long as the lock is held.
#[derive(Debug, Default)]
pub struct InhibitorWakeLock {
    child: Option<Child>,
}

impl InhibitorWakeLock {
    pub fn new() -> Self {
        Self { child: None }
    }

    #[cfg(target_os = "macos")]
    fn spawn_inhibitor() -> io::Result<Child> {
        Command::new("caffeinate")
            .arg("-d")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
    }

    #[cfg(target_os = "linux")]
    fn spawn_inhibitor() -> io::Result<Child> {
        Command::new("systemd-inhibit")
            .args([
                "--what=idle",
                "--who=proctor",
                "--why=exam countdown on display",
                "sleep",
                "infinity",
            ])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux")))]
    fn spawn_inhibitor() -> io::Result<Child> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "no idle inhibitor on this platform",
        ))
    }
}

impl WakeLock for InhibitorWakeLock {
    fn acquire(&mut self) -> bool {
        // A live child already holds the inhibit.
        if let Some(child) = self.child.as_mut() {
            if matches!(child.try_wait(), Ok(None)) {
                return true;
            }
            self.child = None;
        }

        match Self::spawn_inhibitor() {
            Ok(child) => {
                info!("wake lock acquired (inhibitor pid {})", child.id());
                self.child = Some(child);
                true
            }
            Err(err) => {
                warn!("wake lock unavailable: {err}");
                false
            }
        }
    }

    fn release(&mut self) {
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
            info!("wake lock released");
        }
    }

    fn is_held(&self) -> bool {
        self.child.is_some()
    }
}

impl Drop for InhibitorWakeLock {
    fn drop(&mut self) {
        self.release();
    }
}

/// No-op lock for tests and hosts without an inhibitor.
#[derive(Debug, Default)]
pub struct NoopWakeLock {
    held: bool,
}

impl WakeLock for NoopWakeLock {
    fn acquire(&mut self) -> bool {
        self.held = true;
        true
    }

    fn release(&mut self) {
        self.held = false;
    }

    fn is_held(&self) -> bool {
        self.held
    }
}
