//! Thin demonstration CLI host over the four supported container formats.
//! Not the library's primary interface — a showcase for `info`, `list`,
//! `show`, and `extract` over DOCX/PPTX/XLSX/PDF and bare CFB.

use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "parchment-cli")]
#[command(author, version, about = "Inspect OOXML/PDF/CFB documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print format detection and document-level metadata.
    Info { path: PathBuf },
    /// List the parts (package parts / PDF pages / CFB streams) a file contains.
    List { path: PathBuf },
    /// Print a document's extracted plain text, or one PDF page's content stream.
    Show {
        path: PathBuf,
        /// 0-based PDF page index; ignored for other formats.
        #[arg(long)]
        page: Option<usize>,
    },
    /// Write a single OPC part's raw bytes, or a CFB stream's raw bytes, to stdout or a file.
    Extract {
        path: PathBuf,
        /// OPC part name (e.g. `/word/document.xml`) or CFB stream path segments
        /// joined with `/` (e.g. `Root Entry/Data`).
        #[arg(long)]
        part: String,
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Info { path } => info(&path),
        Commands::List { path } => list(&path),
        Commands::Show { path, page } => show(&path, page),
        Commands::Extract { path, part, out } => extract(&path, &part, out.as_deref()),
    };

    match result {
        Ok(data) => {
            println!("{}", json!({"success": true, "data": data}));
        },
        Err((code, message)) => {
            println!("{}", json!({"success": false, "error": {"code": code, "message": message}}));
            std::process::exit(1);
        },
    }
}

type CliResult = Result<Value, (&'static str, String)>;

fn detect(path: &std::path::Path) -> Result<parchment::common::FileFormat, (&'static str, String)> {
    parchment::common::detect_file_format(path).ok_or(("unrecognized_format", format!("{}: not a recognized OOXML/PDF/CFB file", path.display())))
}

fn info(path: &std::path::Path) -> CliResult {
    use parchment::common::FileFormat;
    let format = detect(path)?;
    let data = match format {
        FileFormat::Docx => {
            let doc = parchment::document::Document::open(path).map_err(|e| ("open_failed", e.to_string()))?;
            let meta = doc.metadata().map_err(|e| ("read_failed", e.to_string()))?;
            json!({"format": "docx", "metadata": meta})
        },
        FileFormat::Pptx => {
            let prs = parchment::presentation::Presentation::open(path).map_err(|e| ("open_failed", e.to_string()))?;
            let slide_count = prs.slide_count().map_err(|e| ("read_failed", e.to_string()))?;
            json!({"format": "pptx", "slide_count": slide_count})
        },
        FileFormat::Xlsx => {
            let wb = parchment::sheet::Workbook::open(path).map_err(|e| ("open_failed", e.to_string()))?;
            let meta = wb.metadata().map_err(|e| ("read_failed", e.to_string()))?;
            let sheets = wb.worksheet_names().map_err(|e| ("read_failed", e.to_string()))?;
            json!({"format": "xlsx", "metadata": meta, "worksheet_names": sheets})
        },
        FileFormat::Pdf => {
            let buf = std::fs::read(path).map_err(|e| ("io_error", e.to_string()))?;
            let pdf = parchment::pdf::PdfDocument::parse(buf).map_err(|e| ("parse_failed", e.to_string()))?;
            let pages = pdf.pages().map_err(|e| ("read_failed", e.to_string()))?;
            json!({"format": "pdf", "page_count": pages.len()})
        },
        FileFormat::Cfb => {
            let file = std::fs::File::open(path).map_err(|e| ("io_error", e.to_string()))?;
            let ole = parchment::ole::OleFile::open(file).map_err(|e| ("open_failed", e.to_string()))?;
            json!({"format": "cfb", "file_size": ole.file_size()})
        },
    };
    Ok(data)
}

fn list(path: &std::path::Path) -> CliResult {
    use parchment::common::FileFormat;
    let format = detect(path)?;
    let data = match format {
        FileFormat::Docx | FileFormat::Pptx | FileFormat::Xlsx => {
            let pkg = parchment::ooxml::OpcPackage::open(path).map_err(|e| ("open_failed", e.to_string()))?;
            let parts: Vec<Value> = pkg
                .iter_parts()
                .map(|p| json!({"partname": p.partname().as_str(), "content_type": p.content_type()}))
                .collect();
            json!({"parts": parts})
        },
        FileFormat::Pdf => {
            let buf = std::fs::read(path).map_err(|e| ("io_error", e.to_string()))?;
            let pdf = parchment::pdf::PdfDocument::parse(buf).map_err(|e| ("parse_failed", e.to_string()))?;
            let pages = pdf.pages().map_err(|e| ("read_failed", e.to_string()))?;
            json!({"pages": (0..pages.len()).collect::<Vec<_>>()})
        },
        FileFormat::Cfb => {
            let file = std::fs::File::open(path).map_err(|e| ("io_error", e.to_string()))?;
            let ole = parchment::ole::OleFile::open(file).map_err(|e| ("open_failed", e.to_string()))?;
            let streams: Vec<String> = ole.list_streams().into_iter().map(|p| p.join("/")).collect();
            json!({"streams": streams})
        },
    };
    Ok(data)
}

fn show(path: &std::path::Path, page: Option<usize>) -> CliResult {
    use parchment::common::FileFormat;
    let format = detect(path)?;
    let data = match format {
        FileFormat::Docx => {
            let doc = parchment::document::Document::open(path).map_err(|e| ("open_failed", e.to_string()))?;
            json!({"text": doc.text().map_err(|e| ("read_failed", e.to_string()))?})
        },
        FileFormat::Pptx => {
            let prs = parchment::presentation::Presentation::open(path).map_err(|e| ("open_failed", e.to_string()))?;
            json!({"text": prs.text().map_err(|e| ("read_failed", e.to_string()))?})
        },
        FileFormat::Xlsx => {
            let wb = parchment::sheet::Workbook::open(path).map_err(|e| ("open_failed", e.to_string()))?;
            json!({"text": wb.text().map_err(|e| ("read_failed", e.to_string()))?})
        },
        FileFormat::Pdf => {
            let buf = std::fs::read(path).map_err(|e| ("io_error", e.to_string()))?;
            let pdf = parchment::pdf::PdfDocument::parse(buf).map_err(|e| ("parse_failed", e.to_string()))?;
            let pages = pdf.pages().map_err(|e| ("read_failed", e.to_string()))?;
            let index = page.unwrap_or(0);
            let page_dict = pages
                .get(index)
                .ok_or(("page_out_of_range", format!("page {index} out of range (file has {} pages)", pages.len())))?;
            let content = pdf.page_content_bytes(page_dict).map_err(|e| ("read_failed", e.to_string()))?;
            json!({"page": index, "content_stream": String::from_utf8_lossy(&content)})
        },
        FileFormat::Cfb => {
            return Err(("unsupported_operation", "show is not meaningful for a bare CFB container; use list + extract".to_string()));
        },
    };
    Ok(data)
}

fn extract(path: &std::path::Path, part: &str, out: Option<&std::path::Path>) -> CliResult {
    use parchment::common::FileFormat;
    let format = detect(path)?;
    let bytes = match format {
        FileFormat::Docx | FileFormat::Pptx | FileFormat::Xlsx => {
            let pkg = parchment::ooxml::OpcPackage::open(path).map_err(|e| ("open_failed", e.to_string()))?;
            let uri = parchment::ooxml::PackURI::new(part).map_err(|e| ("invalid_part_name", e.to_string()))?;
            pkg.get_part(&uri).map_err(|e| ("part_not_found", e.to_string()))?.blob().to_vec()
        },
        FileFormat::Cfb => {
            let file = std::fs::File::open(path).map_err(|e| ("io_error", e.to_string()))?;
            let mut ole = parchment::ole::OleFile::open(file).map_err(|e| ("open_failed", e.to_string()))?;
            let segments: Vec<&str> = part.split('/').collect();
            ole.open_stream(&segments).map_err(|e| ("stream_not_found", e.to_string()))?
        },
        FileFormat::Pdf => {
            return Err(("unsupported_operation", "PDF has no named parts; use `show --page` instead".to_string()));
        },
    };

    match out {
        Some(out_path) => {
            std::fs::write(out_path, &bytes).map_err(|e| ("io_error", e.to_string()))?;
            Ok(json!({"bytes_written": bytes.len(), "path": out_path.display().to_string()}))
        },
        None => Ok(json!({"bytes_base64": base64_encode(&bytes)})),
    }
}

/// Minimal base64 encoder for the `extract`-to-stdout path; no dependency on
/// a base64 crate is carried since this is the CLI host's only use of it.
fn base64_encode(data: &[u8]) -> String {
    const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";
    let mut out = String::with_capacity(data.len().div_ceil(3) * 4);
    for chunk in data.chunks(3) {
        let b0 = chunk[0];
        let b1 = chunk.get(1).copied();
        let b2 = chunk.get(2).copied();
        out.push(ALPHABET[(b0 >> 2) as usize] as char);
        out.push(ALPHABET[(((b0 & 0x03) << 4) | (b1.unwrap_or(0) >> 4)) as usize] as char);
        out.push(if let Some(b1) = b1 {
            ALPHABET[(((b1 & 0x0F) << 2) | (b2.unwrap_or(0) >> 6)) as usize] as char
        } else {
            '='
        });
        out.push(if let Some(b2) = b2 { ALPHABET[(b2 & 0x3F) as usize] as char } else { '=' });
    }
    out
}
