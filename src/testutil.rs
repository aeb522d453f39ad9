//! Test utilities: a scripted command runner and isolated settings.
//!
//! `FakeRunner` stands in for `svn` and `git`. It answers `--version` probes
//! for the programs it was given, materializes its configured files when asked
//! to export or pull, and records every invocation.

use std::{
    cell::RefCell,
    collections::HashSet,
    fs, io,
    net::SocketAddr,
    path::{Path, PathBuf},
};

use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
};

use crate::{
    catalog::SkillRecord,
    config::Config,
    runner::{CommandOutput, CommandRunner},
};

/// Scripted stand-in for external version control tools.
#[derive(Debug, Default)]
pub struct FakeRunner {
    /// Programs that exist on the fake host.
    programs: HashSet<String>,
    /// Files (relative path, contents) produced by export or pull.
    files: Vec<(String, String)>,
    /// Subcommand that fails with a diagnostic.
    failing: Option<String>,
    /// Recorded invocations as `program arg...`.
    invocations: RefCell<Vec<String>>,
}

impl FakeRunner {
    /// A host with no tools installed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `programs` available on the fake host.
    pub fn with_programs(mut self, programs: &[&str]) -> Self {
        self.programs
            .extend(programs.iter().map(|program| (*program).to_string()));
        self
    }

    /// Add a file that export and pull will produce.
    pub fn with_file(mut self, path: &str, contents: &str) -> Self {
        self.files.push((path.to_string(), contents.to_string()));
        self
    }

    /// Make the given subcommand exit unsuccessfully.
    pub fn failing_on(mut self, subcommand: &str) -> Self {
        self.failing = Some(subcommand.to_string());
        self
    }

    /// Invocations recorded so far.
    pub fn invocations(&self) -> Vec<String> {
        self.invocations.borrow().clone()
    }

    /// Write the configured files beneath `dir`.
    fn materialize(&self, dir: &Path) -> io::Result<()> {
        for (path, contents) in &self.files {
            let target = dir.join(path);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(target, contents)?;
        }
        Ok(())
    }

    /// Folder named by the sparse checkout pattern in `work`.
    fn sparse_folder(work: &Path) -> io::Result<PathBuf> {
        let pattern = fs::read_to_string(work.join(".git").join("info").join("sparse-checkout"))?;
        let folder = pattern.trim().trim_end_matches("/*");
        Ok(work.join(folder))
    }
}

impl CommandRunner for FakeRunner {
    fn run(&self, program: &str, args: &[&str], cwd: Option<&Path>) -> io::Result<CommandOutput> {
        let mut line = program.to_string();
        for arg in args {
            line.push(' ');
            line.push_str(arg);
        }
        self.invocations.borrow_mut().push(line);

        if !self.programs.contains(program) {
            return Err(io::Error::new(io::ErrorKind::NotFound, "program not found"));
        }

        let subcommand = args.first().copied().unwrap_or_default();
        if self.failing.as_deref() == Some(subcommand) {
            return Ok(CommandOutput {
                success: false,
                stdout: String::new(),
                stderr: format!("{program}: simulated failure\n"),
            });
        }

        match (program, subcommand) {
            ("svn", "export") => {
                let target = args.get(2).map(PathBuf::from).unwrap_or_default();
                fs::create_dir_all(&target)?;
                self.materialize(&target)?;
            }
            ("git", "pull") if !self.files.is_empty() => {
                let work = cwd.unwrap_or(Path::new("."));
                self.materialize(&Self::sparse_folder(work)?)?;
            }
            _ => {}
        }

        Ok(CommandOutput {
            success: true,
            stdout: format!("{program} ok\n"),
            stderr: String::new(),
        })
    }
}

/// Settings rooted inside `dir`, with skills installed to `dir/skills`.
pub fn test_config(dir: &Path) -> Config {
    test_config_with(dir, "")
}

/// Like [`test_config`], with `extra` appended to the settings file.
pub fn test_config_with(dir: &Path, extra: &str) -> Config {
    let path = dir.join("skillget.toml");
    fs::write(
        &path,
        format!("catalog = \"catalog.json\"\nskills_dir = \"skills\"\nhttp_timeout_secs = 5\n{extra}"),
    )
    .expect("write test config");
    Config::load_from(&path).expect("load test config")
}

/// Build a raw HTTP/1.1 response that closes the connection.
pub fn http_response(status: &str, headers: &[(&str, &str)], body: &str) -> String {
    let mut response = format!(
        "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n",
        body.len()
    );
    for (name, value) in headers {
        response.push_str(&format!("{name}: {value}\r\n"));
    }
    response.push_str("\r\n");
    response.push_str(body);
    response
}

/// Serve canned responses on a loopback port, keyed by request path.
///
/// Unknown paths get a 404. Each connection answers a single request.
pub async fn serve(routes: Vec<(String, String)>) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        while let Ok((mut stream, _)) = listener.accept().await {
            let mut buffer = vec![0_u8; 8192];
            let read = stream.read(&mut buffer).await.unwrap_or(0);
            let request = String::from_utf8_lossy(&buffer[..read]);
            let path = request.split_whitespace().nth(1).unwrap_or("/");
            let response = routes
                .iter()
                .find(|(route, _)| route == path)
                .map_or_else(
                    || http_response("404 Not Found", &[], "not found"),
                    |(_, response)| response.clone(),
                );
            stream.write_all(response.as_bytes()).await.ok();
            stream.shutdown().await.ok();
        }
    });
    addr
}

/// Build a catalog record pointing at a GitHub tree URL.
pub fn record(name: &str, author: &str, stars: u64) -> SkillRecord {
    SkillRecord {
        name: name.to_string(),
        author: author.to_string(),
        description: format!("Description for {name}"),
        source_url: format!("https://github.com/{author}/skills/tree/main/skills/{name}"),
        path: format!("skills/{name}"),
        stars,
        forks: 0,
    }
}

#[cfg(test)]
mod tests {
    use std::io::ErrorKind;

    use tempfile::tempdir;

    use super::{FakeRunner, test_config};
    use crate::runner::CommandRunner;

    #[test]
    fn unknown_programs_fail_to_spawn() {
        let runner = FakeRunner::new();
        let error = runner.run("svn", &["--version"], None).expect_err("spawn");
        assert_eq!(error.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn export_writes_files_to_target() {
        let dir = tempdir().expect("tempdir");
        let target = dir.path().join("out");
        let runner = FakeRunner::new()
            .with_programs(&["svn"])
            .with_file("SKILL.md", "# X\n");
        let target_arg = target.to_str().expect("utf-8");
        let output = runner
            .run("svn", &["export", "https://x", target_arg], None)
            .expect("run");
        assert!(output.success);
        assert!(target.join("SKILL.md").is_file());
    }

    #[test]
    fn config_points_into_fixture() {
        let dir = tempdir().expect("tempdir");
        let config = test_config(dir.path());
        assert!(config.skills_dir().ends_with("skills"));
        assert!(config.catalog().ends_with("catalog.json"));
    }
}
