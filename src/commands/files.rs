//! Implementation of `mkdir`, `rm`, `mv` and `cp`.
//!
//! These are single calls against the archive API; any failure is the
//! command's error.

use crate::cli::{MkdirArgs, RmArgs, TransferArgs};
use crate::context::ShellContext;
use crate::error::{Result, ShellError};
use crate::resolve::ResolvedTarget;

fn required<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ShellError::UserError(format!("{} is required", name)))
}

/// Resolve both ends of a move or copy, which must share one archive.
fn resolve_pair(ctx: &ShellContext, command: &str, args: &TransferArgs) -> Result<(ResolvedTarget, ResolvedTarget)> {
    let src = required(&args.src, "src")?;
    let dst = required(&args.dst, "dst")?;

    let resolver = ctx.resolver();
    let src = resolver.resolve(src)?;
    let dst = resolver.resolve(dst)?;

    if src.archive.key() != dst.archive.key() {
        return Err(ShellError::UserError(format!(
            "{}: {} and {} are in different archives",
            command,
            src.url(),
            dst.url()
        )));
    }
    Ok((src, dst))
}

/// `mkdir <dst>`
pub fn cmd_mkdir(ctx: &ShellContext, args: MkdirArgs) -> Result<()> {
    let target = ctx.resolver().resolve(required(&args.dst, "dst")?)?;
    target.archive.mkdir(&target.path)?;
    log::debug!("created {}", target.url());
    Ok(())
}

/// `rm <dst>`
pub fn cmd_rm(ctx: &ShellContext, args: RmArgs) -> Result<()> {
    let target = ctx.resolver().resolve(required(&args.dst, "dst")?)?;
    target.archive.unlink(&target.path)?;
    log::debug!("removed {}", target.url());
    Ok(())
}

/// `mv <src> <dst>`
pub fn cmd_mv(ctx: &ShellContext, args: TransferArgs) -> Result<()> {
    let (src, dst) = resolve_pair(ctx, "mv", &args)?;
    src.archive.rename(&src.path, &dst.path)?;
    log::debug!("moved {} to {}", src.url(), dst.url());
    Ok(())
}

/// `cp <src> <dst>`
pub fn cmd_cp(ctx: &ShellContext, args: TransferArgs) -> Result<()> {
    let (src, dst) = resolve_pair(ctx, "cp", &args)?;
    src.archive.copy(&src.path, &dst.path)?;
    log::debug!("copied {} to {}", src.url(), dst.url());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ArchiveError, ResolutionError};
    use crate::exit_codes;
    use crate::resolve::Cwd;
    use crate::test_support::create_test_home;
    use std::fs;

    fn transfer(src: &str, dst: &str) -> TransferArgs {
        TransferArgs {
            src: Some(src.to_string()),
            dst: Some(dst.to_string()),
        }
    }

    #[test]
    fn test_missing_arguments_are_user_errors() {
        let (_home, ctx) = create_test_home();

        let err = cmd_mkdir(&ctx, MkdirArgs { dst: None }).unwrap_err();
        assert_eq!(err.to_string(), "dst is required");
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);

        let err = cmd_rm(&ctx, RmArgs { dst: None }).unwrap_err();
        assert_eq!(err.to_string(), "dst is required");

        let err = cmd_mv(&ctx, TransferArgs::default()).unwrap_err();
        assert_eq!(err.to_string(), "src is required");

        let err = cmd_cp(
            &ctx,
            TransferArgs {
                src: Some("a".to_string()),
                dst: None,
            },
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "dst is required");
    }

    #[test]
    fn test_mkdir_and_rm() {
        let (home, mut ctx) = create_test_home();
        ctx.set_cwd(Cwd::in_archive("blog", "/posts")).unwrap();
        let root = home.path().join("archives/blog");

        cmd_mkdir(
            &ctx,
            MkdirArgs {
                dst: Some("2025".to_string()),
            },
        )
        .unwrap();
        assert!(root.join("posts/2025").is_dir());

        let err = cmd_mkdir(
            &ctx,
            MkdirArgs {
                dst: Some("2025".to_string()),
            },
        )
        .unwrap_err();
        assert!(matches!(err, ShellError::Archive(ArchiveError::AlreadyExists(_))));

        cmd_rm(
            &ctx,
            RmArgs {
                dst: Some("/about.md".to_string()),
            },
        )
        .unwrap();
        assert!(!root.join("about.md").exists());
    }

    #[test]
    fn test_rm_refuses_directories() {
        let (_home, mut ctx) = create_test_home();
        ctx.set_cwd(Cwd::in_archive("blog", "/")).unwrap();

        let err = cmd_rm(
            &ctx,
            RmArgs {
                dst: Some("drafts".to_string()),
            },
        )
        .unwrap_err();
        assert_eq!(err.exit_code(), exit_codes::ARCHIVE_FAILURE);
    }

    #[test]
    fn test_mv_and_cp_within_archive() {
        let (home, mut ctx) = create_test_home();
        ctx.set_cwd(Cwd::in_archive("blog", "/")).unwrap();
        let root = home.path().join("archives/blog");

        cmd_cp(&ctx, transfer("posts", "backup")).unwrap();
        assert_eq!(
            fs::read_to_string(root.join("backup/2023/hello.md")).unwrap(),
            "# Hello\n"
        );
        assert!(root.join("posts/2023/hello.md").exists());

        cmd_mv(&ctx, transfer("about.md", "drafts/about.md")).unwrap();
        assert!(!root.join("about.md").exists());
        assert!(root.join("drafts/about.md").exists());
    }

    #[test]
    fn test_transfer_across_archives_is_rejected() {
        let (home, ctx) = create_test_home();

        let err = cmd_mv(&ctx, transfer("dat://blog/about.md", "dat://photos/about.md")).unwrap_err();
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
        assert!(err.to_string().contains("different archives"));
        assert!(home.path().join("archives/blog/about.md").exists());
    }

    #[test]
    fn test_home_is_not_a_target() {
        let (_home, ctx) = create_test_home();

        let err = cmd_mkdir(
            &ctx,
            MkdirArgs {
                dst: Some("~".to_string()),
            },
        )
        .unwrap_err();
        assert!(matches!(err, ShellError::Resolution(ResolutionError::NoArchive(_))));
    }
}
