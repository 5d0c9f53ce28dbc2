//! Descriptor file parser for image sets.
//!
//! The format is line oriented. Empty lines and lines starting with `#` are
//! ignored. A `time N` or `time N M` line sets the running default duration
//! (milliseconds) applied to subsequent frame lines. Every other line names
//! an image, resolved relative to the descriptor file's directory, followed
//! by optional `time N [M]` and `branch F P` token groups:
//!
//! ```text
//! # walking cycle
//! time 120
//! walk_1.png
//! walk_2.png time 80
//! walk_3.png branch 0 30 branch 1 20
//! ```
//!
//! Malformed lines are skipped with a warning; only an unreadable file aborts
//! the parse.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Component, Path};

use log::warn;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A weighted transition from one frame to another within the same clip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    /// Target frame index, relative to the start of the clip being loaded.
    pub target: usize,
    /// Chance in percent that this branch is taken when the frame is left.
    pub percent: u32,
}

/// One parsed frame line: image path, duration range and branch table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameDescriptor {
    /// Root-relative, normalized image path.
    pub image_path: String,
    /// Minimum display time in milliseconds.
    pub duration_min: u32,
    /// Maximum display time in milliseconds.
    pub duration_max: u32,
    /// Weighted branches, walked in order when the frame is left.
    pub branches: SmallVec<[Branch; 4]>,
}

/// Resolve a relative image reference against a root-relative base directory.
///
/// `..` segments pop accumulated components; popping past the configured
/// root returns `None`, as do absolute paths. The result uses `/` separators
/// so it can key the image store on any platform.
pub fn resolve_image_path(base_dir: &Path, filename: &str) -> Option<String> {
    let mut parts: Vec<String> = Vec::new();
    for comp in base_dir.components().chain(Path::new(filename).components()) {
        match comp {
            Component::Normal(s) => parts.push(s.to_string_lossy().into_owned()),
            Component::ParentDir => {
                parts.pop()?;
            }
            Component::CurDir => {}
            Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    if parts.is_empty() { None } else { Some(parts.join("/")) }
}

/// Parse the descriptor file at `root.join(rel_path)`.
///
/// `default_ms` seeds the running default duration used for frame lines that
/// carry no `time` of their own. Returns `Err` only if the file cannot be
/// read; malformed or out-of-root lines are skipped with a warning.
pub fn parse(root: &Path, rel_path: &Path, default_ms: u32) -> io::Result<Vec<FrameDescriptor>> {
    let file = File::open(root.join(rel_path))?;
    let reader = BufReader::new(file);
    let base_dir = rel_path.parent().unwrap_or_else(|| Path::new(""));

    let mut descriptors = Vec::new();
    let mut time_min = default_ms;
    let mut time_max = default_ms;

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_num = idx + 1;

        // normalize: no CR, no tabs, no outer whitespace
        let line = line.replace('\r', "").replace('\t', " ");
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens[0] == "time" {
            match parse_time_directive(&tokens) {
                Some((min, max)) => {
                    time_min = min;
                    time_max = max;
                }
                None => {
                    warn!(
                        "{}:{}: malformed time directive skipped: {:?}",
                        rel_path.display(),
                        line_num,
                        line
                    );
                }
            }
        } else if let Some(desc) =
            parse_frame_line(&tokens, base_dir, time_min, time_max, rel_path, line_num)
        {
            descriptors.push(desc);
        }
    }

    Ok(descriptors)
}

/// Handle `time N` / `time N M`, returning the new running default range.
fn parse_time_directive(tokens: &[&str]) -> Option<(u32, u32)> {
    match tokens {
        ["time", n] => {
            let ms = n.parse().ok()?;
            Some((ms, ms))
        }
        ["time", n, m] => {
            let min = n.parse().ok()?;
            let max = m.parse().ok()?;
            if min <= max { Some((min, max)) } else { None }
        }
        _ => None,
    }
}

/// Handle one frame line. Returns `None` (after warning) on any malformed
/// token group or an image reference that escapes the root.
fn parse_frame_line(
    tokens: &[&str],
    base_dir: &Path,
    time_min: u32,
    time_max: u32,
    rel_path: &Path,
    line_num: usize,
) -> Option<FrameDescriptor> {
    let image_path = match resolve_image_path(base_dir, tokens[0]) {
        Some(p) => p,
        None => {
            warn!(
                "{}:{}: image reference {:?} escapes the pixmap root, frame skipped",
                rel_path.display(),
                line_num,
                tokens[0]
            );
            return None;
        }
    };

    let mut desc = FrameDescriptor {
        image_path,
        duration_min: time_min,
        duration_max: time_max,
        branches: SmallVec::new(),
    };

    let malformed = |what: &str| {
        warn!(
            "{}:{}: malformed {} tokens, frame line skipped",
            rel_path.display(),
            line_num,
            what
        );
    };

    let mut idx = 1;
    while idx < tokens.len() {
        match tokens[idx] {
            "time" => {
                let Some(min) = tokens.get(idx + 1).and_then(|t| t.parse().ok()) else {
                    malformed("time");
                    return None;
                };
                // the max value is optional: `time N` means a fixed duration
                match tokens.get(idx + 2).and_then(|t| t.parse::<u32>().ok()) {
                    Some(max) if min <= max => {
                        desc.duration_min = min;
                        desc.duration_max = max;
                        idx += 3;
                    }
                    Some(_) => {
                        malformed("time");
                        return None;
                    }
                    None => {
                        desc.duration_min = min;
                        desc.duration_max = min;
                        idx += 2;
                    }
                }
            }
            "branch" => {
                let target = tokens.get(idx + 1).and_then(|t| t.parse().ok());
                let percent = tokens.get(idx + 2).and_then(|t| t.parse().ok());
                match (target, percent) {
                    (Some(target), Some(percent)) if (1..=100).contains(&percent) => {
                        desc.branches.push(Branch { target, percent });
                        idx += 3;
                    }
                    _ => {
                        malformed("branch");
                        return None;
                    }
                }
            }
            other => {
                warn!(
                    "{}:{}: unknown token {:?}, frame line skipped",
                    rel_path.display(),
                    line_num,
                    other
                );
                return None;
            }
        }
    }

    Some(desc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicU32, Ordering};

    static FIXTURE_ID: AtomicU32 = AtomicU32::new(0);

    /// Write a descriptor file under a unique temp root and return the root.
    fn fixture(rel: &str, contents: &str) -> PathBuf {
        let id = FIXTURE_ID.fetch_add(1, Ordering::Relaxed);
        let root = std::env::temp_dir().join(format!(
            "brackenengine-parser-{}-{}",
            std::process::id(),
            id
        ));
        let full = root.join(rel);
        fs::create_dir_all(full.parent().unwrap()).unwrap();
        fs::write(&full, contents).unwrap();
        root
    }

    #[test]
    fn unreadable_file_is_an_error() {
        let root = std::env::temp_dir();
        assert!(parse(&root, Path::new("definitely/not/here.imgset"), 1000).is_err());
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let root = fixture(
            "anim.imgset",
            "# header comment\n\n   \t \none.png\n  # indented comment\ntwo.png\n",
        );
        let descs = parse(&root, Path::new("anim.imgset"), 1000).unwrap();
        assert_eq!(descs.len(), 2);
        assert_eq!(descs[0].image_path, "one.png");
        assert_eq!(descs[1].image_path, "two.png");
    }

    #[test]
    fn running_default_applies_to_later_frames_only() {
        let root = fixture("anim.imgset", "one.png\ntime 40 60\ntwo.png\nthree.png\n");
        let descs = parse(&root, Path::new("anim.imgset"), 1000).unwrap();
        assert_eq!(descs.len(), 3);
        assert_eq!((descs[0].duration_min, descs[0].duration_max), (1000, 1000));
        assert_eq!((descs[1].duration_min, descs[1].duration_max), (40, 60));
        assert_eq!((descs[2].duration_min, descs[2].duration_max), (40, 60));
    }

    #[test]
    fn frame_time_overrides_and_branches_parse() {
        let root = fixture(
            "anim.imgset",
            "one.png time 50\ntwo.png time 30 70 branch 0 25 branch 3 10\n",
        );
        let descs = parse(&root, Path::new("anim.imgset"), 1000).unwrap();
        assert_eq!((descs[0].duration_min, descs[0].duration_max), (50, 50));
        assert!(descs[0].branches.is_empty());
        assert_eq!((descs[1].duration_min, descs[1].duration_max), (30, 70));
        assert_eq!(
            descs[1].branches.as_slice(),
            &[
                Branch {
                    target: 0,
                    percent: 25
                },
                Branch {
                    target: 3,
                    percent: 10
                }
            ]
        );
    }

    #[test]
    fn concrete_three_frame_scenario() {
        let root = fixture(
            "anim.imgset",
            "1.png\n2.png time 50\n3.png branch 0 100\n",
        );
        let descs = parse(&root, Path::new("anim.imgset"), 1000).unwrap();
        assert_eq!(descs.len(), 3);
        assert_eq!((descs[0].duration_min, descs[0].duration_max), (1000, 1000));
        assert!(descs[0].branches.is_empty());
        assert_eq!((descs[1].duration_min, descs[1].duration_max), (50, 50));
        assert_eq!(
            descs[2].branches.as_slice(),
            &[Branch {
                target: 0,
                percent: 100
            }]
        );
    }

    #[test]
    fn malformed_lines_are_skipped_not_fatal() {
        let root = fixture(
            "anim.imgset",
            "one.png\ntwo.png branch zero 10\nthree.png time\nfour.png\n",
        );
        let descs = parse(&root, Path::new("anim.imgset"), 1000).unwrap();
        assert_eq!(descs.len(), 2);
        assert_eq!(descs[0].image_path, "one.png");
        assert_eq!(descs[1].image_path, "four.png");
    }

    #[test]
    fn tabs_and_crlf_are_normalized() {
        let root = fixture("anim.imgset", "one.png\ttime\t25\r\n\ttwo.png  \r\n");
        let descs = parse(&root, Path::new("anim.imgset"), 1000).unwrap();
        assert_eq!(descs.len(), 2);
        assert_eq!((descs[0].duration_min, descs[0].duration_max), (25, 25));
        assert_eq!(descs[1].image_path, "two.png");
    }

    #[test]
    fn images_resolve_relative_to_descriptor_directory() {
        let root = fixture("enemy/walk.imgset", "step_1.png\n../shared/flash.png\n");
        let descs = parse(&root, Path::new("enemy/walk.imgset"), 1000).unwrap();
        assert_eq!(descs[0].image_path, "enemy/step_1.png");
        assert_eq!(descs[1].image_path, "shared/flash.png");
    }

    #[test]
    fn escaping_the_root_skips_the_frame() {
        let root = fixture("anim.imgset", "../../etc/shadow.png\nok.png\n");
        let descs = parse(&root, Path::new("anim.imgset"), 1000).unwrap();
        assert_eq!(descs.len(), 1);
        assert_eq!(descs[0].image_path, "ok.png");
    }

    #[test]
    fn resolve_image_path_pops_parents() {
        assert_eq!(
            resolve_image_path(Path::new("enemy/furball"), "../flash.png"),
            Some("enemy/flash.png".to_string())
        );
        assert_eq!(resolve_image_path(Path::new(""), "../out.png"), None);
        assert_eq!(resolve_image_path(Path::new("a"), "../../out.png"), None);
        assert_eq!(resolve_image_path(Path::new(""), "/abs.png"), None);
        assert_eq!(
            resolve_image_path(Path::new(""), "./a/./b.png"),
            Some("a/b.png".to_string())
        );
    }
}
