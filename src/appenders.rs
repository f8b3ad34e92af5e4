use std::{
    fs::{File, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
};

use tracing_subscriber::fmt::MakeWriter;

/// 追記モードで開いたログファイル。
///
/// 1行ごとに1回の`write_all`で書き込み、直ちにフラッシュする。
/// 同じファイルに複数の`FileAppender`が書き込む場合の順序は、OSの追記モードに任せる。
#[derive(Debug)]
pub struct FileAppender {
    path: PathBuf,
    file: File,
}

impl FileAppender {
    /// `FileAppender`を作成する。
    ///
    /// ファイルが存在しない場合は作成するが、ディレクトリは作成しない。
    ///
    /// # 引数
    ///
    /// * path: ログファイルパス。
    ///
    /// # 戻り値
    ///
    /// `FileAppender`インスタンス。
    pub fn open(path: impl AsRef<Path>) -> io::Result<FileAppender> {
        let path = path.as_ref().to_path_buf();
        let file = create_writer(&path)?;

        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 1行を書き込む。
    ///
    /// `line`の末尾に改行を付けてから、1回の書き込みで出力する。
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut buf = String::with_capacity(line.len() + 1);
        buf.push_str(line);
        buf.push('\n');

        let mut writer = &self.file;
        writer.write_all(buf.as_bytes())?;
        writer.flush()
    }
}

/// `tracing_subscriber::fmt`のレイヤーから同じファイルに出力するための実装。
impl<'a> MakeWriter<'a> for FileAppender {
    type Writer = &'a File;

    fn make_writer(&'a self) -> Self::Writer {
        &self.file
    }
}

/// ライターを作成する。
///
/// # 引数
///
/// * path: ログファイルパス。
///
/// # 戻り値
///
/// `File`インスタンス。
fn create_writer(path: &Path) -> io::Result<File> {
    OpenOptions::new().append(true).create(true).open(path)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_open_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.log");

        let appender = FileAppender::open(&path).unwrap();
        assert!(path.is_file());
        assert_eq!(path, appender.path());
    }

    #[test]
    fn test_open_does_not_create_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log").join("test.log");

        let err = FileAppender::open(&path).unwrap_err();
        assert_eq!(io::ErrorKind::NotFound, err.kind());
        assert!(!dir.path().join("log").exists());
    }

    #[test]
    fn test_write_line_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.log");
        fs::write(&path, "existing\n").unwrap();

        let appender = FileAppender::open(&path).unwrap();
        appender.write_line("first").unwrap();
        appender.write_line("second").unwrap();

        assert_eq!("existing\nfirst\nsecond\n", fs::read_to_string(&path).unwrap());
    }

    #[test]
    fn test_make_writer_shares_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.log");

        let appender = FileAppender::open(&path).unwrap();
        appender.make_writer().write_all(b"from tracing\n").unwrap();
        appender.write_line("from appender").unwrap();

        assert_eq!(
            "from tracing\nfrom appender\n",
            fs::read_to_string(&path).unwrap()
        );
    }
}
