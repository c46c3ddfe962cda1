use std::fmt::Debug;
use std::sync::RwLock;

use owo_colors::OwoColorize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Running,
    Failed,
    Success,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Running => write!(f, "{}", "Running:".bright_blue()),
            Status::Failed => write!(f, "{}", "Failed:".bright_red()),
            Status::Success => write!(f, "{}", "Success:".bright_green()),
        }
    }
}

pub trait AsyncFn {
    type Future: std::future::Future<Output = anyhow::Result<String>>;
    fn call(self) -> Self::Future;
}

impl<F, Fut> AsyncFn for F
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future<Output = anyhow::Result<String>>,
{
    type Future = Fut;
    fn call(self) -> Self::Future {
        self()
    }
}

struct StatusLine {
    message: String,
    status: Status,
}

impl Debug for StatusLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatusLine")
            .field("message", &self.message)
            .field("status", &self.status)
            .finish()
    }
}

/// Status-line output on stderr, command results on stdout.
#[derive(Debug, Default)]
pub struct Ui {
    current: RwLock<Option<StatusLine>>,
}

impl Ui {
    pub fn new() -> Self {
        Self::default()
    }

    fn set_status(&self, message: impl AsRef<str>, status: Status) {
        let line = StatusLine {
            message: message.as_ref().into(),
            status,
        };
        eprintln!("{} {}", line.status, line.message);
        if let Ok(mut current) = self.current.write() {
            *current = Some(line);
        }
    }

    pub fn status(&self) -> Option<Status> {
        self.current
            .read()
            .ok()
            .and_then(|current| current.as_ref().map(|line| line.status))
    }

    pub fn new_status_line(&self, message: impl AsRef<str>) {
        self.set_status(message, Status::Running)
    }

    pub fn failed(&self, message: impl AsRef<str>) {
        self.set_status(message, Status::Failed)
    }

    pub fn success(&self, message: impl AsRef<str>) {
        self.set_status(message, Status::Success)
    }

    pub fn println(&self, message: impl AsRef<str>) {
        println!("{}", message.as_ref());
    }

    pub fn eprintln(&self, message: impl AsRef<str>) {
        eprintln!("{}", message.as_ref());
    }

    /// Forgets the current status line.
    pub fn clear(&self) {
        if let Ok(mut current) = self.current.write() {
            *current = None;
        }
    }

    /// Runs `x`, prints its output on success and marks the status line as
    /// failed otherwise.
    pub async fn run<F>(&self, x: F) -> anyhow::Result<()>
    where
        F: AsyncFn,
    {
        match x.call().await {
            Ok(result) => {
                if !result.is_empty() {
                    self.println(result);
                }
                Ok(())
            }
            Err(e) => {
                self.failed(e.to_string());
                Err(e)
            }
        }
    }
}
