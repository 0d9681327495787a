use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

/// Shows an image outside the terminal.
pub trait ImageViewer {
    fn show(&mut self, path: &Path) -> io::Result<()>;
}

/// Opens images with a configured program, or the desktop default opener.
#[derive(Debug, Clone, Default)]
pub struct SystemViewer {
    program: Option<String>,
}

impl SystemViewer {
    pub fn new(program: Option<String>) -> Self {
        Self { program }
    }
}

impl ImageViewer for SystemViewer {
    fn show(&mut self, path: &Path) -> io::Result<()> {
        match &self.program {
            Some(program) => Command::new(program)
                .arg(path)
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn()
                .map(|_| ()),
            None => open::that(path),
        }
    }
}
