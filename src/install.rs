//! Skill installation: method selection, retrieval and the usage guide.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, warn};

use crate::{
    catalog::SkillRecord,
    descriptor::{InstalledSkillConfig, extract},
    diagnostics::Diagnostics,
    error::{Error, Result},
    location::RepoLocation,
    palette,
    paths::display_path,
    retrieve::{InstallMethod, Retriever, remove_dir_if_exists},
    runner::CommandRunner,
    skill::{SKILL_FILE_NAME, list_installed_files, read_descriptor, validate_skill_name},
};

/// Width of the rules framing the usage guide.
const RULE_WIDTH: usize = 80;

/// Outcome of a successful installation.
#[derive(Debug, Clone)]
pub struct InstallReport {
    /// Directory the skill was installed into.
    pub skill_dir: PathBuf,
    /// Method that retrieved the files.
    pub method: InstallMethod,
    /// Installed files relative to `skill_dir`.
    pub files: Vec<String>,
    /// Fields read from the installed descriptor.
    pub config: InstalledSkillConfig,
}

/// Installs catalog skills into a skills directory.
#[derive(Debug)]
pub struct Installer<R> {
    /// Retrieval backend.
    retriever: Retriever<R>,
    /// Directory each skill gets its own folder in.
    skills_dir: PathBuf,
    /// Whether output is colorized.
    use_color: bool,
}

impl<R: CommandRunner> Installer<R> {
    /// Create an installer writing into `skills_dir`.
    pub fn new(retriever: Retriever<R>, skills_dir: &Path, use_color: bool) -> Self {
        Self {
            retriever,
            skills_dir: skills_dir.to_path_buf(),
            use_color,
        }
    }

    /// Install a skill and print the usage guide, reporting failures.
    ///
    /// Returns whether the installation succeeded. Errors are printed with
    /// troubleshooting hints and never propagated.
    pub async fn install(&self, skill: &SkillRecord, diagnostics: &mut Diagnostics) -> bool {
        println!(
            "\nInstalling skill: {}...",
            palette::fmt_skill_name(&skill.name, self.use_color)
        );
        println!(
            "   Source: {}",
            palette::fmt_path(&skill.source_url, self.use_color)
        );

        match self.try_install(skill).await {
            Ok(report) => {
                print!("{}", render_guide(skill, &report, self.use_color));
                true
            }
            Err(error) => {
                warn!(skill = %skill.name, %error, "installation failed");
                diagnostics.warn(format!("Installation failed: {error}"));
                for hint in troubleshooting_hints(skill) {
                    diagnostics.note(format!("   - {hint}"));
                }
                false
            }
        }
    }

    /// Install a skill, returning what was installed.
    pub async fn try_install(&self, skill: &SkillRecord) -> Result<InstallReport> {
        validate_skill_name(&skill.name)?;
        let location = RepoLocation::parse(&skill.source_url).ok_or_else(|| Error::InvalidUrl {
            url: skill.source_url.clone(),
        })?;

        if !self.skills_dir.is_dir() {
            fs::create_dir_all(&self.skills_dir).map_err(|error| Error::SkillWrite {
                path: self.skills_dir.clone(),
                source: error,
            })?;
            self.step(&format!(
                "Created skills directory: {}",
                display_path(&self.skills_dir)
            ));
        }

        let method = InstallMethod::detect(self.retriever.runner());
        debug!(%method, "selected install method");
        self.step(method.announcement());

        let skill_dir = self.skills_dir.join(&skill.name);
        if skill_dir.exists() {
            println!(
                "   {}",
                palette::fmt_warning("Removing existing installation...", self.use_color)
            );
            remove_dir_if_exists(&skill_dir)?;
        }

        self.retriever.fetch(method, &location, &skill_dir).await?;
        self.step(&format!("Installed to: {}", display_path(&skill_dir)));
        self.step(&format!("Method used: {method}"));

        let files = list_installed_files(&skill_dir)?;
        self.step(&format!("Files installed: {}", files.join(", ")));

        let config = match read_descriptor(&skill_dir)? {
            Some(document) => extract(&document),
            None => InstalledSkillConfig {
                name: skill.name.clone(),
                description: skill.description.clone(),
                ..InstalledSkillConfig::default()
            },
        };

        Ok(InstallReport {
            skill_dir,
            method,
            files,
            config,
        })
    }

    /// Print a completed installation step.
    fn step(&self, message: &str) {
        println!("   {} {message}", palette::fmt_success("✓", self.use_color));
    }
}

/// Suggestions printed after a failed installation.
fn troubleshooting_hints(skill: &SkillRecord) -> Vec<String> {
    let svn_install = if cfg!(windows) {
        "choco install svn"
    } else if cfg!(target_os = "macos") {
        "brew install subversion"
    } else {
        "apt-get install subversion"
    };
    vec![
        format!("Install SVN for efficient downloads: {svn_install}"),
        "Ensure Git is installed and accessible".to_string(),
        "Check your internet connection".to_string(),
        format!("Verify the GitHub URL is accessible: {}", skill.source_url),
    ]
}

/// Render the configuration and usage guide shown after installing.
pub fn render_guide(skill: &SkillRecord, report: &InstallReport, use_color: bool) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let heading = |text: &str| format!("\n{}", palette::fmt_heading(text, use_color));
    let mut lines = vec![
        String::new(),
        rule.clone(),
        format!(
            "{} {}",
            palette::fmt_heading("Configuration & Usage Guide for:", use_color),
            palette::fmt_skill_name(&skill.name, use_color)
        ),
        rule.clone(),
    ];

    let skill_file = report.skill_dir.join(SKILL_FILE_NAME);
    lines.push(heading("Installation Path:"));
    lines.push(format!(
        "   {}",
        palette::fmt_path(&display_path(&skill_file), use_color)
    ));

    lines.push(heading("Installation Method:"));
    lines.push(format!("   {}", report.method));

    let description = [skill.description.as_str(), report.config.description.as_str()]
        .into_iter()
        .find(|text| !text.trim().is_empty())
        .unwrap_or("No description available");
    lines.push(heading("Description:"));
    lines.push(format!("   {description}"));

    lines.push(heading("Author:"));
    lines.push(format!("   {}", skill.author));

    lines.push(heading("GitHub Stats:"));
    lines.push(format!("   Stars: {} | Forks: {}", skill.stars, skill.forks));
    lines.push(format!(
        "   Repository: {}",
        palette::fmt_path(&skill.source_url, use_color)
    ));

    if !report.config.usage.is_empty() {
        lines.push(heading("Usage:"));
        lines.extend(report.config.usage.lines().map(|line| format!("   {line}")));
    }

    let mut examples = report.config.displayed_examples().peekable();
    if examples.peek().is_some() {
        lines.push(heading("Examples:"));
        for (index, example) in examples.enumerate() {
            let label = format!("Example {}:", index + 1);
            lines.push(format!("\n   {}", palette::fmt_label(&label, use_color)));
            lines.extend(example.lines().map(|line| format!("   {line}")));
        }
    }

    lines.push(heading("Next Steps:"));
    lines.push("   1. Restart your agent to load the skill".to_string());
    lines.push("   2. Use the skill in your conversations".to_string());
    lines.push(format!(
        "   3. Check the {SKILL_FILE_NAME} file for detailed documentation"
    ));

    lines.push(format!("\n{rule}\n"));
    lines.join("\n") + "\n"
}
