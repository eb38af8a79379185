use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// A throwaway platform home with cloud documents, a fake juju and a log dir
pub struct TestHome {
    pub root: TempDir,
}

impl TestHome {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        Self { root }
    }

    pub fn write_public_clouds(&self, content: &str) {
        fs::write(self.root.path().join("public-clouds.yaml"), content).unwrap();
    }

    pub fn write_credentials(&self, content: &str) {
        fs::write(self.root.path().join("credentials.yaml"), content).unwrap();
    }

    /// Install an executable shell script as the juju binary
    #[cfg(unix)]
    pub fn write_fake_juju(&self, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = self.root.path().join("bin").join("juju");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    pub fn logs(&self) -> PathBuf {
        self.root.path().join("logs")
    }

    pub fn path(&self) -> PathBuf {
        self.root.path().to_path_buf()
    }

    #[allow(deprecated)]
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::Command::cargo_bin("cloudsweep").unwrap();
        cmd.env("JUJU_HOME", self.path())
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .env_remove("WORKSPACE");
        cmd
    }
}
