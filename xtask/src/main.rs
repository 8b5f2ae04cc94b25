use clap::Parser;
use std::path::PathBuf;

mod cli;

const LAUNCHER: &str = "atlas-launcher";
const DIST_ROOT: &str = "HeroAtlas";

async fn run(cmd: &mut tokio::process::Command) -> Result<(), Box<dyn std::error::Error>> {
    let status = cmd.spawn()?.wait().await?;
    if !status.success() {
        return Err(format!("{:?} exited with {}", cmd.as_std().get_program(), status).into());
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = cli::Cli::parse();

    match cli.command {
        cli::Command::Launch { seed_file } => {
            let mut cmd = tokio::process::Command::new("trunk");
            cmd.current_dir(std::fs::canonicalize("frontend")?);
            cmd.arg("build");
            run(&mut cmd).await?;

            let mut cmd = tokio::process::Command::new("cargo");
            cmd.arg("run")
                .arg("--package")
                .arg(LAUNCHER)
                .arg("--")
                .arg("--dist-dir")
                .arg("frontend/dist");
            if let Some(seed_file) = seed_file {
                cmd.arg("--seed-file").arg(seed_file);
            }
            run(&mut cmd).await
        }
        cli::Command::Dist { target_triple } => {
            let mut cmd = tokio::process::Command::new("cargo");
            cmd.arg("build")
                .arg("--package")
                .arg(LAUNCHER)
                .arg("--release");
            let release_dir = match &target_triple {
                Some(target_triple) => {
                    cmd.arg("--target").arg(target_triple);
                    PathBuf::from("target").join(target_triple).join("release")
                }
                None => PathBuf::from("target/release"),
            };
            run(&mut cmd).await?;

            let mut cmd = tokio::process::Command::new("trunk");
            cmd.current_dir(std::fs::canonicalize("frontend")?);
            cmd.arg("build").arg("--release");
            run(&mut cmd).await?;

            let out_dist = PathBuf::from(DIST_ROOT).join("dist");
            tokio::fs::create_dir_all(&out_dist).await?;
            tokio::fs::copy(
                release_dir.join(LAUNCHER),
                PathBuf::from(DIST_ROOT).join(LAUNCHER),
            )
            .await?;
            let mut entries = tokio::fs::read_dir("frontend/dist").await?;
            while let Some(file) = entries.next_entry().await? {
                if file.file_type().await?.is_file() {
                    tokio::fs::copy(file.path(), out_dist.join(file.file_name())).await?;
                }
            }

            Ok(())
        }
    }
}
