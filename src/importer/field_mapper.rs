// ==========================================
// DWG 后台 - 字段映射器实现
// ==========================================
// 职责: 源元素 → artikel 列映射 + 类型转换
// 规则: 数值缺省 0 / 标志位 "1" / 可选文本 None / 描述去 RTF
// ==========================================

use crate::domain::article::{ArticleRow, RawProductRecord};
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::{DataCleaner as _, FieldMapper as FieldMapperTrait};
use crate::importer::rtf::rtf_to_plain;

pub struct FieldMapper;

impl FieldMapperTrait for FieldMapper {
    fn map_to_article(&self, record: &RawProductRecord) -> ImportResult<ArticleRow> {
        let c = DataCleaner;
        let get = |key: &str| record.get(key);

        // 主键没有默认值
        let id = c
            .parse_identifier(get("ID"))
            .ok_or_else(|| ImportError::InvalidIdentifier {
                position: record.position,
                raw: get("ID").map(str::to_string),
            })?;

        Ok(ArticleRow {
            id,

            // 基础信息
            code_nr: c.normalize_null(get("CodeNr")),
            barcode_nr: c.normalize_null(get("BarCodeNr")),
            name: c.normalize_null(get("Name")),
            description: rtf_to_plain(get("Description")),
            category: c.normalize_null(get("Category")),
            unit: c.normalize_null(get("Unit")),

            // 价格
            purchase_price: c.number_or_zero(get("PurchasePrice")),
            sales_price_min: c.number_or_zero(get("SalesPriceMin")),
            sales_price: c.number_or_zero(get("SalesPrice")),
            sales_price_max: c.number_or_zero(get("SalesPriceMax")),
            is_brutto: c.sentinel_flag(get("IsBrutto")),
            discount: c.number_or_zero(get("Discount")),
            vat: c.number_or_zero(get("VAT")),
            undiscountable: c.sentinel_flag(get("Undiscountable")),

            // 库存
            stock_tot: c.number_or_zero(get("StockTot")),
            stock_min: c.number_or_zero(get("StockMin")),
            stock_max: c.number_or_zero(get("StockMax")),
            storehouse_name: c.normalize_null(get("StorehouseName")),
            use_stock: c.sentinel_flag(get("UseStock")),

            // 可用性
            unavailability: c.sentinel_flag(get("Unavailability")),
            unavailability_date: c.normalize_null(get("UnavailabilityDate")),

            // 元信息
            timestamp: c.normalize_null(get("TimeStamp")),
            register_date: c.normalize_null(get("RegisterDate")),
            short_comment: c.normalize_null(get("ShortComment")),

            // 会计与收藏
            ledger_account: c.normalize_null(get("Buchhaltungskonto")),
            is_favorite: c.sentinel_flag(get("IstFavorit")),
            favorite_position: c.integer_or_zero(get("PositionFavorit")),
            is_return_article: c.sentinel_flag(get("IstRetourartikel")),
        })
    }
}
