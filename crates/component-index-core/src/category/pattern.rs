//! Component Pattern
//!
//! カテゴリのGlobパターンをスキャンルート配下で展開する。
//!
//! - パターンはセグメント（`/`区切り）単位でルートから順に解決する
//! - `**`は0個以上のディレクトリにマッチ
//! - `*`等のワイルドカードは`.`始まりの名前にマッチしない（`.env*`のように明示した場合のみ）
//! - 末尾`/`はディレクトリのみを対象とし、表示パスにも`/`を残す

use std::ffi::OsStr;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use tracing::debug;
use walkdir::WalkDir;

use crate::error::{IndexError, Result};

// 隠しファイルの扱いはSegment側で判定する
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// パターンの1セグメント
#[derive(Debug, Clone)]
enum Segment {
    /// メタ文字を含まない名前（`.`を含む）
    Literal(String),
    /// `*`, `?`, `[...]`を含む名前
    Wildcard(Pattern),
    /// `**`
    Recursive,
}

impl Segment {
    fn parse(raw: &str, text: &str) -> Result<Self> {
        let invalid = |message: &str| IndexError::InvalidPattern {
            pattern: raw.to_string(),
            message: message.to_string(),
        };

        match text {
            "" => Err(invalid("empty path segment")),
            ".." => Err(invalid("'..' would leave the scan root")),
            "**" => Ok(Self::Recursive),
            _ if text.contains(['*', '?', '[']) => Pattern::new(text)
                .map(Self::Wildcard)
                .map_err(|e| invalid(&e.to_string())),
            _ => Ok(Self::Literal(text.to_string())),
        }
    }
}

/// 明示的に`.`で始まるセグメント以外は隠し名にマッチさせない
fn is_hidden(name: &OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}

/// コンパイル済みのカテゴリパターン
#[derive(Debug, Clone)]
pub struct ComponentPattern {
    raw: String,
    segments: Vec<Segment>,
    dir_only: bool,
}

/// パターン展開で得られた実在パス
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMatch {
    /// ルート相対・`/`区切りの表示用パス
    pub display: String,
    /// ファイルシステム上のパス
    pub path: PathBuf,
}

/// 展開途中の候補（実パスと表示用セグメント）
struct Candidate {
    path: PathBuf,
    parts: Vec<String>,
}

impl Candidate {
    fn child(&self, path: PathBuf, parts: impl IntoIterator<Item = String>) -> Self {
        let mut next = self.parts.clone();
        next.extend(parts);
        Self { path, parts: next }
    }
}

impl ComponentPattern {
    /// パターンを検証してコンパイル
    pub fn new(raw: &str) -> Result<Self> {
        let dir_only = raw.ends_with('/');
        let body = raw.trim_end_matches('/');

        if body.is_empty() {
            return Err(IndexError::InvalidPattern {
                pattern: raw.to_string(),
                message: "pattern is empty".to_string(),
            });
        }
        if Path::new(body).is_absolute() {
            return Err(IndexError::InvalidPattern {
                pattern: raw.to_string(),
                message: "pattern must be relative to the scan root".to_string(),
            });
        }

        let segments = body
            .split('/')
            .map(|s| Segment::parse(raw, s))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            raw: raw.to_string(),
            segments,
            dir_only,
        })
    }

    /// 元のパターン文字列
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// ディレクトリのみを対象とするか
    pub fn is_dir_only(&self) -> bool {
        self.dir_only
    }

    /// `root`配下でパターンを展開
    ///
    /// ルートはパターン文字列に埋め込まず、セグメントごとにディレクトリを辿る。
    /// 展開後に存在しないパス（壊れたシンボリックリンク、スキャン中に削除されたもの）は除外。
    /// 展開中のIOエラーはそのまま返す。
    pub fn resolve(&self, root: &Path) -> Result<Vec<ResolvedMatch>> {
        let mut frontier = vec![Candidate {
            path: root.to_path_buf(),
            parts: Vec::new(),
        }];
        let last = self.segments.len() - 1;

        for (idx, segment) in self.segments.iter().enumerate() {
            let is_last = idx == last;
            let mut next = Vec::new();
            for candidate in &frontier {
                match segment {
                    Segment::Literal(name) => {
                        let path = candidate.path.join(name);
                        // 最終セグメントの存在確認は後段でまとめて行う
                        if is_last || path.is_dir() {
                            next.push(candidate.child(path, [name.clone()]));
                        }
                    }
                    Segment::Wildcard(pattern) => {
                        expand_wildcard(candidate, pattern, is_last, &mut next)?
                    }
                    Segment::Recursive => expand_recursive(candidate, is_last, &mut next)?,
                }
            }
            frontier = next;
        }

        let mut matches = Vec::new();
        for candidate in frontier {
            if !candidate.path.exists() {
                debug!(path = %candidate.path.display(), "match vanished before check");
                continue;
            }
            if self.dir_only && !candidate.path.is_dir() {
                continue;
            }
            let mut display = candidate.parts.join("/");
            if self.dir_only {
                display.push('/');
            }
            matches.push(ResolvedMatch {
                display,
                path: candidate.path,
            });
        }

        debug!(pattern = %self.raw, count = matches.len(), "resolved pattern");
        Ok(matches)
    }
}

fn expand_wildcard(
    candidate: &Candidate,
    pattern: &Pattern,
    is_last: bool,
    next: &mut Vec<Candidate>,
) -> Result<()> {
    let entries = match fs::read_dir(&candidate.path) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(IndexError::io(&candidate.path, e)),
    };

    let explicit_dot = pattern.as_str().starts_with('.');
    for entry in entries {
        let entry = entry.map_err(|e| IndexError::io(&candidate.path, e))?;
        let name = entry.file_name();
        if is_hidden(&name) && !explicit_dot {
            continue;
        }
        let name = name.to_string_lossy().into_owned();
        if !pattern.matches_with(&name, MATCH_OPTIONS) {
            continue;
        }
        let path = entry.path();
        if is_last || path.is_dir() {
            next.push(candidate.child(path, [name]));
        }
    }
    Ok(())
}

/// `**`: 自身と配下の隠しでないディレクトリ（最終セグメントならファイルも）
fn expand_recursive(
    candidate: &Candidate,
    is_last: bool,
    next: &mut Vec<Candidate>,
) -> Result<()> {
    let walker = WalkDir::new(&candidate.path)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e.file_name()));

    for entry in walker {
        let entry = entry.map_err(|e| IndexError::Walk {
            path: candidate.path.clone(),
            source: e,
        })?;
        if !is_last && !entry.path().is_dir() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(&candidate.path) else {
            continue;
        };
        if relative.as_os_str().is_empty() && candidate.parts.is_empty() {
            continue;
        }
        let parts = relative
            .iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect::<Vec<_>>();
        next.push(candidate.child(entry.path().to_path_buf(), parts));
    }
    Ok(())
}
