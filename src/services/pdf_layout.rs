//! PDF 排版
//!
//! 纯计算：把标题和文本块折行、分页，得到每一行的坐标。
//! 不依赖 printpdf，测试可以用等宽度量直接检查结果。

use std::mem;

use ttf_parser::Face;

use crate::error::RenderError;

/// 1pt = 25.4 / 72 mm
pub const PT_TO_MM: f32 = 25.4 / 72.0;

const WIDTH_EPSILON: f32 = 1e-3;

/// 页面设置（单位：毫米，字号单位：pt）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSetup {
    pub width_mm: f32,
    pub height_mm: f32,
    /// 左、右、上边距
    pub margin_mm: f32,
    /// 自动分页的下边距
    pub bottom_margin_mm: f32,
    pub font_size_pt: f32,
    pub line_height_mm: f32,
    /// 文本块之间的空白
    pub block_gap_mm: f32,
}

impl Default for PageSetup {
    /// A4，边距 10mm，下边距 15mm，12pt 字号，行高 10mm
    fn default() -> Self {
        Self {
            width_mm: 210.0,
            height_mm: 297.0,
            margin_mm: 10.0,
            bottom_margin_mm: 15.0,
            font_size_pt: 12.0,
            line_height_mm: 10.0,
            block_gap_mm: 10.0,
        }
    }
}

impl PageSetup {
    /// 可写区域宽度
    pub fn text_width_mm(&self) -> f32 {
        self.width_mm - 2.0 * self.margin_mm
    }

    fn font_size_mm(&self) -> f32 {
        self.font_size_pt * PT_TO_MM
    }

    /// 可写区域必须至少放得下一行
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.font_size_pt <= 0.0 || self.line_height_mm <= 0.0 {
            return Err(RenderError::PageSetup(
                "font size and line height must be positive".to_string(),
            ));
        }
        if self.text_width_mm() <= 0.0 {
            return Err(RenderError::PageSetup(format!(
                "margins of {}mm leave no room on a {}mm wide page",
                self.margin_mm, self.width_mm
            )));
        }
        if self.margin_mm + self.line_height_mm > self.height_mm - self.bottom_margin_mm {
            return Err(RenderError::PageSetup(format!(
                "a {}mm line does not fit between the margins",
                self.line_height_mm
            )));
        }
        Ok(())
    }
}

/// 字符宽度度量
pub trait TextMeasure {
    /// 单个字符的宽度（毫米），字体中没有该字形时返回 None
    fn char_width_mm(&self, c: char, font_size_pt: f32) -> Option<f32>;
}

/// 基于 TrueType 字体 `hmtx` 表的度量
pub struct FontMetrics<'a> {
    face: Face<'a>,
}

impl<'a> FontMetrics<'a> {
    pub fn parse(data: &'a [u8]) -> Result<Self, RenderError> {
        let face = Face::parse(data, 0).map_err(|e| RenderError::FontParse(e.to_string()))?;
        Ok(Self { face })
    }
}

impl TextMeasure for FontMetrics<'_> {
    fn char_width_mm(&self, c: char, font_size_pt: f32) -> Option<f32> {
        if c.is_control() {
            return None;
        }
        let glyph = self.face.glyph_index(c)?;
        let advance = self.face.glyph_hor_advance(glyph)?;
        let units_per_em = f32::from(self.face.units_per_em());
        Some(f32::from(advance) / units_per_em * font_size_pt * PT_TO_MM)
    }
}

/// 折行后的一行
#[derive(Debug, Clone, PartialEq)]
pub struct WrappedLine {
    pub text: String,
    pub width_mm: f32,
}

/// 已定位的一行，`y_mm` 是 PDF 坐标（从页面底部向上）的基线位置
#[derive(Debug, Clone, PartialEq)]
pub struct LaidOutLine {
    pub text: String,
    pub x_mm: f32,
    pub y_mm: f32,
    /// 所属文本块下标，None 表示标题
    pub block: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    pub lines: Vec<LaidOutLine>,
}

/// 排版整份文档：标题居中，文本块左对齐，块间留白，超出下边距自动换页
pub fn layout_document(
    title: &str,
    blocks: &[String],
    setup: &PageSetup,
    measure: &impl TextMeasure,
) -> Result<Vec<PageLayout>, RenderError> {
    setup.validate()?;

    let max_width = setup.text_width_mm();
    let mut cursor = PageCursor::new(setup);

    let title_lines = wrap_text(title, max_width, setup.font_size_pt, measure)
        .map_err(|c| RenderError::unsupported_character(c, None))?;
    for line in title_lines {
        let x = setup.margin_mm + (max_width - line.width_mm).max(0.0) / 2.0;
        cursor.place(line.text, x, None);
    }
    cursor.advance(setup.line_height_mm);

    for (index, block) in blocks.iter().enumerate() {
        let lines = wrap_text(block, max_width, setup.font_size_pt, measure)
            .map_err(|c| RenderError::unsupported_character(c, Some(index)))?;
        for line in lines {
            cursor.place(line.text, setup.margin_mm, Some(index));
        }
        cursor.advance(setup.block_gap_mm);
    }

    Ok(cursor.finish())
}

/// 按宽度折行
///
/// 换行符分段，段内按空格断词，单词本身超宽时按字符断开。
/// 遇到字体无法显示的字符返回该字符。
pub fn wrap_text(
    text: &str,
    max_width_mm: f32,
    font_size_pt: f32,
    measure: &impl TextMeasure,
) -> Result<Vec<WrappedLine>, char> {
    let normalized = text
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace('\t', "    ");

    let mut lines = Vec::new();
    for paragraph in normalized.split('\n') {
        wrap_paragraph(paragraph, max_width_mm, font_size_pt, measure, &mut lines)?;
    }
    Ok(lines)
}

fn wrap_paragraph(
    paragraph: &str,
    max_width: f32,
    font_size_pt: f32,
    measure: &impl TextMeasure,
    out: &mut Vec<WrappedLine>,
) -> Result<(), char> {
    let char_width = |c: char| measure.char_width_mm(c, font_size_pt).ok_or(c);
    let limit = max_width + WIDTH_EPSILON;
    let space = char_width(' ')?;

    let mut line = String::new();
    let mut width = 0.0f32;

    for (i, word) in paragraph.split(' ').enumerate() {
        let word_width = word
            .chars()
            .try_fold(0.0f32, |acc, c| char_width(c).map(|w| acc + w))?;
        let joiner = if i > 0 { space } else { 0.0 };

        if width + joiner + word_width <= limit {
            if i > 0 {
                line.push(' ');
            }
            line.push_str(word);
            width += joiner + word_width;
            continue;
        }

        if !line.is_empty() {
            out.push(WrappedLine {
                text: mem::take(&mut line),
                width_mm: width,
            });
            width = 0.0;
        }

        if word_width <= limit {
            line.push_str(word);
            width = word_width;
            continue;
        }

        for c in word.chars() {
            let w = char_width(c)?;
            if width + w > limit && !line.is_empty() {
                out.push(WrappedLine {
                    text: mem::take(&mut line),
                    width_mm: width,
                });
                width = 0.0;
            }
            line.push(c);
            width += w;
        }
    }

    out.push(WrappedLine {
        text: line,
        width_mm: width,
    });
    Ok(())
}

/// 纵向游标，负责换页
struct PageCursor<'a> {
    setup: &'a PageSetup,
    pages: Vec<PageLayout>,
    /// 当前行顶部到页面顶部的距离
    y: f32,
}

impl<'a> PageCursor<'a> {
    fn new(setup: &'a PageSetup) -> Self {
        Self {
            setup,
            pages: vec![PageLayout::default()],
            y: setup.margin_mm,
        }
    }

    fn place(&mut self, text: String, x_mm: f32, block: Option<usize>) {
        let setup = self.setup;
        if self.y + setup.line_height_mm > setup.height_mm - setup.bottom_margin_mm {
            self.pages.push(PageLayout::default());
            self.y = setup.margin_mm;
        }

        // 文字在行内垂直居中
        let baseline_from_top = self.y + 0.5 * setup.line_height_mm + 0.3 * setup.font_size_mm();
        let line = LaidOutLine {
            text,
            x_mm,
            y_mm: setup.height_mm - baseline_from_top,
            block,
        };
        if let Some(page) = self.pages.last_mut() {
            page.lines.push(line);
        }
        self.y += setup.line_height_mm;
    }

    fn advance(&mut self, height_mm: f32) {
        self.y += height_mm;
    }

    fn finish(self) -> Vec<PageLayout> {
        self.pages
    }
}
