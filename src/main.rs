use clap::Parser;
use opfmeta::epub::opf::DEFAULT_CONFIG_PATH;
use opfmeta::{Book, ContentFileParser, Epub, EpubError, ParserConfig, Result};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// 📚 opfmeta - EPUB元数据提取工具
#[derive(Parser)]
#[command(name = "opfmeta")]
#[command(about = "从EPUB或OPF文件中提取书目元数据")]
#[command(version)]
struct Args {
    /// EPUB或OPF文件路径
    #[arg(help = "要处理的EPUB文件或OPF包文件路径", required_unless_present = "generate_config")]
    file: Option<PathBuf>,

    /// 输出格式
    #[arg(short, long, value_enum, default_value = "text", help = "元数据的输出格式")]
    format: OutputFormat,

    /// 解析配置文件
    #[arg(short, long, help = "YAML格式的解析配置文件路径")]
    config: Option<PathBuf>,

    /// 生成默认配置文件
    #[arg(
        long,
        value_name = "PATH",
        num_args = 0..=1,
        default_missing_value = DEFAULT_CONFIG_PATH,
        help = "生成默认配置文件后退出（默认写入当前目录的 opfmeta.yaml，已存在时不覆盖）"
    )]
    generate_config: Option<PathBuf>,

    /// 详细输出模式
    #[arg(short, long, action = clap::ArgAction::Count, help = "显示详细日志（-vv 显示调试日志）")]
    verbose: u8,
}

/// 元数据输出格式
#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum OutputFormat {
    /// 每行一个字段
    Text,
    /// YAML映射
    Yaml,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("❌ 错误: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args) -> Result<()> {
    if let Some(target) = &args.generate_config {
        ParserConfig::generate_default_config(target)?;
        println!("✅ 已生成配置文件: {}", target.display());
        return Ok(());
    }

    let config = match &args.config {
        Some(path) => ParserConfig::from_file(path)?,
        None => ParserConfig::default_config(),
    };
    debug!(?config, "使用解析配置");
    let parser = ContentFileParser::with_config(config);

    let path = args
        .file
        .as_deref()
        .ok_or_else(|| EpubError::ConfigError("没有指定输入文件".to_string()))?;
    let book = read_book(path, &parser)?;

    match args.format {
        OutputFormat::Text => display_metadata(&book),
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(&book.metadata)
                .map_err(|e| EpubError::ConfigError(format!("序列化元数据失败: {}", e)))?;
            print!("{}", yaml);
        }
    }

    Ok(())
}

/// 按扩展名读取EPUB包或单独的OPF文件
fn read_book(path: &Path, parser: &ContentFileParser) -> Result<Book> {
    let is_opf = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("opf"));

    if is_opf {
        let content = std::fs::read_to_string(path)?;
        let mut book = Book::with_opf_path(path.display().to_string());
        parser.parse_into(&content, Some(&mut book))?;
        Ok(book)
    } else {
        Epub::from_path(path)?.read_book_with(parser)
    }
}

/// 显示元数据信息
fn display_metadata(book: &Book) {
    println!("📊 元数据信息:");
    if let Some(opf_path) = &book.opf_path {
        println!("  📦 OPF文件: {}", opf_path);
    }

    println!("  📖 标题: {}", book.title());
    if let Some(author) = book.author() {
        match book.author_sort() {
            Some(sort) if sort != author => println!("  ✍️  作者: {} [排序: {}]", author, sort),
            _ => println!("  ✍️  作者: {}", author),
        }
    }
    if let Some(isbn) = book.metadata.isbn() {
        println!("  🔖 ISBN: {}", isbn);
    }
    if let Some(uuid) = book.metadata.uuid() {
        println!("  🔖 UUID: {}", uuid);
    }
    if let Some(cover) = book.cover_id() {
        println!("  🖼️  封面: {}", cover);
    }

    let known = ["title", "creator", "creatorFileAs", "ISBN", "UUID", "cover"];
    let others: Vec<_> = book
        .metadata
        .iter()
        .filter(|(key, _)| !known.contains(key))
        .collect();
    if !others.is_empty() {
        println!("\n  🏷️  其他字段:");
        for (key, value) in others {
            println!("    {}: {}", key, value.unwrap_or("(未定义)"));
        }
    }
}
