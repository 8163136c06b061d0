use std::io::Cursor;

use chrono::{DateTime, Local};

use crate::models::topic::Topic;

/// 一次生成周期的最终产物
///
/// 每次生成都会整体替换上一份，不做版本管理
#[derive(Debug, Clone)]
pub struct Document {
    pub topic: Topic,
    pub title: String,
    /// 下载文件名
    pub file_name: String,
    /// 按请求顺序排列的带标签文本块
    pub blocks: Vec<String>,
    pub page_count: usize,
    pub generated_at: DateTime<Local>,
    bytes: Vec<u8>,
}

impl Document {
    pub fn new(topic: Topic, blocks: Vec<String>, bytes: Vec<u8>, page_count: usize) -> Self {
        Self {
            topic,
            title: topic.practice_title(),
            file_name: topic.practice_file_name(),
            blocks,
            page_count,
            generated_at: Local::now(),
            bytes,
        }
    }

    /// 序列化后的 PDF
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// 从头开始读取的缓冲区
    pub fn reader(&self) -> Cursor<&[u8]> {
        Cursor::new(self.bytes.as_slice())
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn test_reader_starts_at_beginning() {
        let doc = Document::new(
            Topic::GeneralKnowledge,
            vec!["Topic: General Knowledge\n\nx".to_string()],
            b"%PDF-1.3 body".to_vec(),
            1,
        );
        let mut head = [0u8; 5];
        doc.reader().read_exact(&mut head).unwrap();
        assert_eq!(&head, b"%PDF-");
        assert_eq!(doc.file_name, "general knowledge_clat_practice.pdf");
        assert_eq!(doc.title, "General Knowledge Practice Set");
        assert_eq!(doc.len(), 13);
    }
}
