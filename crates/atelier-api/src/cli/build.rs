//! `atelier build` -- drive a full build against a running server.
//!
//! The headless counterpart of the browser workbench: uploads context
//! files (same size gate), submits the prompt with the transparent retry,
//! prints the transcript and file tree, and optionally exports the zip.

use std::path::PathBuf;

use anyhow::{bail, Context};
use console::style;

use atelier_core::builder::prompt;
use atelier_core::workbench::{NoticeKind, Workbench, WorkbenchStatus};
use atelier_infra::client::HttpBuilderRemote;

pub async fn run(
    server: &str,
    prompt_arg: Option<String>,
    preset: Option<String>,
    context: Vec<PathBuf>,
    export: Option<PathBuf>,
    json: bool,
) -> anyhow::Result<()> {
    let prompt_text = match (prompt_arg, preset) {
        (Some(text), _) => text,
        (None, Some(name)) => prompt::preset(&name)
            .with_context(|| format!("unknown preset '{name}'"))?
            .to_string(),
        (None, None) => bail!("provide a prompt or --preset"),
    };

    let mut workbench = Workbench::new();

    for path in &context {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload.txt");
        workbench.upload(name, content);
    }

    let remote = HttpBuilderRemote::new(server);
    if !workbench.build(&remote, &prompt_text).await {
        bail!("nothing submitted");
    }

    if json {
        let files: Vec<serde_json::Value> = workbench
            .files()
            .iter()
            .map(|f| serde_json::json!({ "path": f.path, "bytes": f.content.len() }))
            .collect();
        let out = serde_json::json!({
            "status": format!("{:?}", workbench.status()).to_lowercase(),
            "files": files,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print_transcript(&workbench);
        if workbench.status() == WorkbenchStatus::Ready {
            print_tree(&workbench);
        }
    }

    if workbench.status() != WorkbenchStatus::Ready {
        bail!("build failed");
    }

    if let Some(path) = export {
        let bytes = workbench.export()?;
        tokio::fs::write(&path, &bytes)
            .await
            .with_context(|| format!("failed to write {}", path.display()))?;
        if !json {
            println!(
                "  {} Exported {} ({} bytes)",
                style("✓").green(),
                style(path.display()).cyan(),
                bytes.len()
            );
        }
    }

    Ok(())
}

fn print_transcript(workbench: &Workbench) {
    println!();
    for notice in workbench.transcript() {
        let line = match notice.kind {
            NoticeKind::Prompt => format!("{} {}", style("$").dim(), notice.text),
            NoticeKind::Info => format!("{}", style(&notice.text).dim()),
            NoticeKind::Success => format!("{}", style(&notice.text).green()),
            NoticeKind::Warning => format!("{}", style(&notice.text).yellow()),
            NoticeKind::Error => format!("{}", style(&notice.text).red()),
        };
        println!("  {line}");
    }
}

fn print_tree(workbench: &Workbench) {
    println!();
    for group in workbench.tree() {
        match &group.dir {
            None => {
                for entry in &group.entries {
                    println!("  📄 {}", entry.path);
                }
            }
            Some(dir) => {
                println!("  📁 {dir}/");
                for entry in &group.entries {
                    println!("    📄 {}", entry.name);
                }
            }
        }
    }
    println!();
}
