//! 产物写出：先写同目录临时文件再重命名，失败的运行不会破坏已有产物

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::error::MechResult;

pub struct ArtifactWriter;

impl ArtifactWriter {
    /// 以缩进格式写出 JSON（保留非 ASCII 字符）
    pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> MechResult<()> {
        let bytes = serde_json::to_vec_pretty(value)?;
        Self::write_bytes(path, &bytes)
    }

    pub fn write_bytes(path: &Path, bytes: &[u8]) -> MechResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let temp = Self::temp_path(path);
        if let Err(e) = fs::write(&temp, bytes).and_then(|_| fs::rename(&temp, path)) {
            let _ = fs::remove_file(&temp);
            return Err(e.into());
        }

        debug!("Wrote {} ({} bytes)", path.display(), bytes.len());
        Ok(())
    }

    fn temp_path(path: &Path) -> PathBuf {
        let mut name = path.file_name().map(OsString::from).unwrap_or_default();
        name.push(".tmp");
        path.with_file_name(name)
    }
}
