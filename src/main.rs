use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use fountain_markup::{generate_html, generate_title_html, parse, Conf, Document};

/// Parse a Fountain screenplay and print what was found.
#[derive(Parser, Debug)]
#[command(name = "fountain-parser", version, about)]
struct Cli {
    /// Fountain file to read
    file: PathBuf,

    /// What to print
    #[arg(short, long, value_enum, default_value_t = Format::Summary)]
    format: Format,

    /// JSON file with parser settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Summary,
    Json,
    Html,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("读取配置失败: {}", path.display()))?;
            Conf::from_json(&json).with_context(|| format!("配置无效: {}", path.display()))?
        }
        None => Conf::default(),
    };

    let content = fs::read_to_string(&cli.file)
        .with_context(|| format!("读取文件失败: {}", cli.file.display()))?;
    let document = parse(&content, &config);
    info!(file = %cli.file.display(), elements = document.elements().len(), "解析完成");

    let rendered = match cli.format {
        Format::Summary => summary(&document),
        Format::Json => serde_json::to_string_pretty(&document)?,
        Format::Html => format!(
            "{}{}",
            generate_title_html(&document),
            generate_html(&document, &config)
        ),
    };

    match &cli.output {
        Some(path) => {
            fs::write(path, rendered).with_context(|| format!("写入失败: {}", path.display()))?;
            println!("输出已保存到: {}", path.display());
        }
        None => print!("{}", rendered),
    }
    Ok(())
}

fn summary(document: &Document) -> String {
    let props = document.properties();
    let mut out = String::new();
    for (key, value) in document.title_fields().iter() {
        out.push_str(&format!("{}: {}\n", key, value));
    }
    out.push_str(&format!("元素数量: {}\n", document.elements().len()));
    out.push_str(&format!("场景数量: {}\n", props.scenes.len()));
    out.push_str(&format!("角色数量: {}\n", props.characters.len()));
    out.push_str(&format!("地点数量: {}\n", props.locations.len()));
    out.push_str(&format!("注解数量: {}\n", document.notes().len()));
    out.push_str(&format!(
        "预估时长: {:.0}秒 (动作 {:.0}秒, 对白 {:.0}秒)\n",
        props.length_action + props.length_dialogue,
        props.length_action,
        props.length_dialogue
    ));
    out
}
