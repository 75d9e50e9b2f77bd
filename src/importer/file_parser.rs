// ==========================================
// DWG 后台 - XML 商品目录解析器
// ==========================================
// 格式: <dataroot><Product>...</Product>...</dataroot>（旧系统导出）
// 红线: 单条 <Product> 与多条一样按列表处理
// ==========================================

use crate::config::import_config::{DEFAULT_RECORD_TAG, DEFAULT_ROOT_TAG};
use crate::domain::article::RawProductRecord;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::CatalogParser;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::borrow::Cow;

// 元素深度: 根 = 1，记录 = 2，字段 = 3
const ROOT_DEPTH: usize = 1;
const RECORD_DEPTH: usize = 2;
const FIELD_DEPTH: usize = 3;

/// 记录元素属性的字段名前缀
pub const ATTRIBUTE_PREFIX: &str = "@";

// ==========================================
// XmlCatalogParser
// ==========================================
pub struct XmlCatalogParser {
    root_tag: String,
    record_tag: String,
}

impl Default for XmlCatalogParser {
    fn default() -> Self {
        Self::new(DEFAULT_ROOT_TAG, DEFAULT_RECORD_TAG)
    }
}

impl XmlCatalogParser {
    pub fn new(root_tag: &str, record_tag: &str) -> Self {
        Self {
            root_tag: root_tag.to_string(),
            record_tag: record_tag.to_string(),
        }
    }

    pub fn record_tag(&self) -> &str {
        &self.record_tag
    }

    /// 新建记录，元素属性以 "@名称" 写入字段（命名空间声明除外）
    ///
    /// 属性与子元素分属不同键，`<Product ID="6">` 不提供 ID 字段
    fn start_record(
        &self,
        element: &BytesStart<'_>,
        position: usize,
    ) -> ImportResult<RawProductRecord> {
        let mut record = RawProductRecord::new(position);
        for attr in element.attributes() {
            let attr = attr.map_err(|e| ImportError::MalformedDocument(e.to_string()))?;
            if attr.key.as_namespace_binding().is_some() {
                continue;
            }
            let key = format!(
                "{}{}",
                ATTRIBUTE_PREFIX,
                String::from_utf8_lossy(attr.key.local_name().as_ref())
            );
            let value = attr.unescape_value()?.trim().to_string();
            record.insert(key, value);
        }
        Ok(record)
    }
}

/// 去掉命名空间前缀的元素名
fn local_name(element: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(element.local_name().as_ref()).into_owned()
}

/// 向字段缓冲追加文本（嵌套元素的文本以空格分隔）
fn append_text(buffer: &mut String, text: Cow<'_, str>) {
    let text = text.trim();
    if text.is_empty() {
        return;
    }
    if !buffer.is_empty() {
        buffer.push(' ');
    }
    buffer.push_str(text);
}

impl CatalogParser for XmlCatalogParser {
    fn parse_records(&self, content: &str) -> ImportResult<Vec<RawProductRecord>> {
        let content = content.trim_start_matches('\u{feff}');
        let mut reader = Reader::from_str(content);
        reader.config_mut().trim_text(true);

        let mut depth = 0usize;
        let mut saw_root = false;
        let mut root_matches = false;
        let mut records: Vec<RawProductRecord> = Vec::new();
        let mut current: Option<RawProductRecord> = None;
        let mut field: Option<(String, String)> = None;

        loop {
            let event = reader.read_event().map_err(|e| {
                ImportError::MalformedDocument(format!(
                    "位置 {}: {}",
                    reader.buffer_position(),
                    e
                ))
            })?;

            match event {
                Event::Eof => break,

                Event::Start(element) => {
                    depth += 1;
                    let name = local_name(&element);
                    match depth {
                        ROOT_DEPTH => {
                            if saw_root {
                                return Err(ImportError::MalformedDocument(format!(
                                    "存在多个根元素: <{}>",
                                    name
                                )));
                            }
                            saw_root = true;
                            root_matches = name == self.root_tag;
                        }
                        RECORD_DEPTH if root_matches && name == self.record_tag => {
                            current = Some(self.start_record(&element, records.len() + 1)?);
                        }
                        FIELD_DEPTH if current.is_some() => {
                            field = Some((name, String::new()));
                        }
                        _ => {}
                    }
                }

                // 自闭合元素不改变深度
                Event::Empty(element) => {
                    let name = local_name(&element);
                    match depth + 1 {
                        ROOT_DEPTH => {
                            if saw_root {
                                return Err(ImportError::MalformedDocument(format!(
                                    "存在多个根元素: <{}>",
                                    name
                                )));
                            }
                            saw_root = true;
                        }
                        RECORD_DEPTH if root_matches && name == self.record_tag => {
                            let record = self.start_record(&element, records.len() + 1)?;
                            records.push(record);
                        }
                        FIELD_DEPTH => {
                            if let Some(record) = current.as_mut() {
                                record.insert(name, String::new());
                            }
                        }
                        _ => {}
                    }
                }

                Event::Text(text) => {
                    if let Some((_, buffer)) = field.as_mut() {
                        append_text(buffer, text.unescape()?);
                    }
                }

                Event::CData(data) => {
                    if let Some((_, buffer)) = field.as_mut() {
                        let raw = data.into_inner();
                        append_text(buffer, String::from_utf8_lossy(&raw));
                    }
                }

                Event::End(_) => {
                    if depth == 0 {
                        return Err(ImportError::MalformedDocument(
                            "多余的结束标签".to_string(),
                        ));
                    }
                    match depth {
                        FIELD_DEPTH => {
                            if let (Some((name, text)), Some(record)) = (field.take(), current.as_mut()) {
                                record.insert(name, text);
                            }
                        }
                        RECORD_DEPTH => {
                            if let Some(record) = current.take() {
                                records.push(record);
                            }
                        }
                        _ => {}
                    }
                    depth -= 1;
                }

                // 声明、注释、处理指令、DOCTYPE
                _ => {}
            }
        }

        if depth != 0 {
            return Err(ImportError::MalformedDocument(format!(
                "文档不完整: {} 个元素未闭合",
                depth
            )));
        }
        if !saw_root {
            return Err(ImportError::MalformedDocument("未找到根元素".to_string()));
        }

        Ok(records)
    }
}
