use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{exit, Command, ExitStatus};

use clap::{Parser, Subcommand, ValueEnum};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "xtask",
    about = "Task runner for the layer auto-deploy workspace",
    long_about = "A unified CLI for running CI checks and packaging the\n\
                  layer auto-deploy Lambda runtime."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run CI checks (fmt, clippy, tests, packaging)
    Ci {
        /// Job to run
        #[arg(value_enum, default_value_t = CiJob::Check)]
        job: CiJob,
    },
    /// Build and package the Lambda runtime as a deployable zip
    LambdaPackage {
        /// Compilation target triple for the Lambda binary
        #[arg(long, default_value = "x86_64-unknown-linux-gnu")]
        target: String,
        /// Build profile used for the binary
        #[arg(value_enum, long, default_value_t = BuildProfile::Release)]
        profile: BuildProfile,
        /// Directory the zip artifact is written to
        #[arg(long, default_value = "dist", env = "LAYER_AUTODEPLOY_DIST_DIR")]
        dist_dir: String,
    },
}

#[derive(Clone, ValueEnum)]
enum CiJob {
    /// Formatting, clippy, and tests
    Check,
    /// Build and zip the Lambda runtime
    Package,
    /// Run check + package
    All,
}

#[derive(Clone, Copy, ValueEnum)]
enum BuildProfile {
    Debug,
    Release,
}

impl BuildProfile {
    fn dir_name(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Release => "release",
        }
    }

    fn as_cargo_flag(self) -> Option<&'static str> {
        match self {
            Self::Debug => None,
            Self::Release => Some("--release"),
        }
    }
}

// ── helpers ────────────────────────────────────────────────────────

const RUNTIME_PACKAGE: &str = "layer_autodeploy_lambda";
const RUNTIME_BINARY: &str = "autodeploy_runtime";

fn step(label: &str) {
    eprintln!("\n=== {label} ===");
}

fn cargo(args: &[&str]) -> ExitStatus {
    eprintln!("+ cargo {}", args.join(" "));
    Command::new("cargo")
        .args(args)
        .status()
        .expect("failed to execute cargo")
}

fn run_cargo(args: &[&str]) {
    let status = cargo(args);
    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}

fn package_lambda_runtime(target: &str, profile: BuildProfile, dist_dir: &Path) {
    if !target.contains("linux") {
        eprintln!("Lambda custom runtimes run on Linux; `{target}` is not a Linux target");
        exit(2);
    }
    require_installed_target(target);

    step("Build layer auto-deploy lambda binary");
    let mut cargo_args = vec![
        "build",
        "-p",
        RUNTIME_PACKAGE,
        "--target",
        target,
        "--bin",
        RUNTIME_BINARY,
    ];
    if let Some(flag) = profile.as_cargo_flag() {
        cargo_args.push(flag);
    }
    run_cargo(&cargo_args);

    step("Package lambda zip artifact");
    let binary_path = Path::new("target")
        .join(target)
        .join(profile.dir_name())
        .join(RUNTIME_BINARY);
    fs::create_dir_all(dist_dir).expect("failed to create lambda dist directory");
    let zip_path = dist_dir.join(format!("{RUNTIME_BINARY}.zip"));
    write_bootstrap_zip(&binary_path, &zip_path);

    eprintln!("\nPackaged artifact:\n- {}", zip_path.display());
}

/// Fails early with the `rustup` command to run. Skipped when rustup is absent.
fn require_installed_target(target: &str) {
    let Ok(output) = Command::new("rustup")
        .args(["target", "list", "--installed"])
        .output()
    else {
        return;
    };

    let installed = String::from_utf8_lossy(&output.stdout);
    if output.status.success() && !installed.lines().any(|line| line.trim() == target) {
        eprintln!("rust target `{target}` is missing; run `rustup target add {target}`");
        exit(2);
    }
}

/// Lambda's `provided.al2023` runtime executes a file named `bootstrap`.
fn write_bootstrap_zip(binary_path: &Path, zip_path: &Path) {
    let binary = fs::read(binary_path).unwrap_or_else(|error| {
        panic!(
            "failed to read lambda binary '{}': {error}",
            binary_path.display()
        )
    });

    let mut zip = ZipWriter::new(fs::File::create(zip_path).expect("failed to create lambda zip"));
    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o755);
    zip.start_file("bootstrap", options)
        .expect("failed to start bootstrap entry");
    zip.write_all(&binary)
        .expect("failed to write bootstrap entry");
    zip.finish().expect("failed to finish lambda zip");
}

// ── CI jobs ────────────────────────────────────────────────────────

fn ci_check() {
    step("Check formatting");
    run_cargo(&["fmt", "--all", "--", "--check"]);

    step("Clippy");
    run_cargo(&[
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ]);

    step("Test layer_autodeploy_core");
    run_cargo(&["test", "-p", "layer_autodeploy_core"]);

    step("Test layer_autodeploy_lambda");
    run_cargo(&["test", "-p", RUNTIME_PACKAGE]);
}

fn ci_package() {
    package_lambda_runtime(
        "x86_64-unknown-linux-gnu",
        BuildProfile::Release,
        Path::new("dist"),
    );
}

// ── main ───────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Ci { job } => {
            match job {
                CiJob::Check => ci_check(),
                CiJob::Package => ci_package(),
                CiJob::All => {
                    ci_check();
                    ci_package();
                }
            }
            eprintln!("\nCI job passed.");
        }
        Commands::LambdaPackage {
            target,
            profile,
            dist_dir,
        } => {
            package_lambda_runtime(&target, profile, Path::new(&dist_dir));
        }
    }
}
