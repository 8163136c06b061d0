//! PDF 组装服务 - 业务能力层
//!
//! 只负责"标题 + 文本块 → PDF 字节"，不关心文本从哪里来
//!
//! 字体在每次组装时读取，字体文件缺失只影响当次生成

use std::io::Cursor;
use std::path::{Path, PathBuf};

use printpdf::{Mm, PdfDocument};
use tracing::debug;

use crate::error::RenderError;
use crate::services::pdf_layout::{layout_document, FontMetrics, PageLayout, PageSetup};

const LAYER_NAME: &str = "Layer 1";

/// 组装结果
#[derive(Debug, Clone)]
pub struct AssembledPdf {
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

/// PDF 组装器
#[derive(Debug, Clone)]
pub struct DocumentAssembler {
    font_path: PathBuf,
    setup: PageSetup,
}

impl DocumentAssembler {
    pub fn new(font_path: impl Into<PathBuf>) -> Self {
        Self {
            font_path: font_path.into(),
            setup: PageSetup::default(),
        }
    }

    pub fn with_setup(mut self, setup: PageSetup) -> Self {
        self.setup = setup;
        self
    }

    pub fn font_path(&self) -> &Path {
        &self.font_path
    }

    /// 读取字体文件
    pub fn load_font(&self) -> Result<Vec<u8>, RenderError> {
        std::fs::read(&self.font_path).map_err(|source| RenderError::FontUnavailable {
            path: self.font_path.clone(),
            source,
        })
    }

    /// 启动时检查字体是否可用
    pub fn check_font(&self) -> Result<(), RenderError> {
        let data = self.load_font()?;
        FontMetrics::parse(&data)?;
        Ok(())
    }

    /// 组装 PDF（同步，调用方应放在阻塞线程里执行）
    pub fn assemble(&self, title: &str, blocks: &[String]) -> Result<AssembledPdf, RenderError> {
        let font_data = self.load_font()?;
        assemble_with_font(title, blocks, &self.setup, &font_data)
    }
}

/// 用给定字体数据组装 PDF
///
/// 先排版再写入，任何字体缺字的字符都会在写入前报错，不会静默丢字
pub fn assemble_with_font(
    title: &str,
    blocks: &[String],
    setup: &PageSetup,
    font_data: &[u8],
) -> Result<AssembledPdf, RenderError> {
    let metrics = FontMetrics::parse(font_data)?;
    let pages = layout_document(title, blocks, setup, &metrics)?;
    debug!("排版完成: {} 个文本块, {} 页", blocks.len(), pages.len());

    let bytes = render_pdf(title, &pages, setup, font_data)?;
    Ok(AssembledPdf {
        bytes,
        page_count: pages.len(),
    })
}

fn render_pdf(
    title: &str,
    pages: &[PageLayout],
    setup: &PageSetup,
    font_data: &[u8],
) -> Result<Vec<u8>, RenderError> {
    let width = Mm(setup.width_mm);
    let height = Mm(setup.height_mm);

    let (doc, first_page, first_layer) = PdfDocument::new(title, width, height, LAYER_NAME);
    let font = doc
        .add_external_font(Cursor::new(font_data))
        .map_err(|e| RenderError::FontParse(e.to_string()))?;

    for (index, page) in pages.iter().enumerate() {
        let (page_index, layer_index) = if index == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(width, height, LAYER_NAME)
        };
        let layer = doc.get_page(page_index).get_layer(layer_index);

        for line in page.lines.iter().filter(|line| !line.text.is_empty()) {
            layer.use_text(
                line.text.as_str(),
                setup.font_size_pt,
                Mm(line.x_mm),
                Mm(line.y_mm),
                &font,
            );
        }
    }

    doc.save_to_bytes()
        .map_err(|e| RenderError::Serialize(e.to_string()))
}
