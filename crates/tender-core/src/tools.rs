//! The tool surface: six named operations with JSON-friendly responses.
//!
//! Every response carries an advisory `instructions` string for an LLM
//! consumer next to the structured payload. The wording is guidance, not a
//! data contract.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::TenderConfig;
use crate::error::TenderError;
use crate::extraction::pdftotext::PdftotextExtractor;
use crate::extraction::PdfExtractor;
use crate::model::{CalculationResult, ExtractionResult, HtmlDocument, MarketPriceResult, PricingModel};
use crate::pricing::{build_pricing_model, MarketPriceSource, SimulatedMarket};

pub const DETECT_PRICING_REQUIREMENTS: &str = "detect_pricing_requirements";
pub const BUILD_MODEL: &str = "build_model";
pub const CALCULATE: &str = "calculate";
pub const MARKET_PRICES: &str = "market_prices";
pub const RENDER_REPORT: &str = "render_report";
pub const FINAL_OUTPUT: &str = "final_output";

/// All tool names, in pipeline order.
pub const TOOL_NAMES: &[&str] = &[
    DETECT_PRICING_REQUIREMENTS,
    BUILD_MODEL,
    CALCULATE,
    MARKET_PRICES,
    RENDER_REPORT,
    FINAL_OUTPUT,
];

const BUILD_MODEL_INSTRUCTIONS: &str = "You now have a structured pricing model under the 'model' key. \
You may modify 'items' (quantities, markups, descriptions) as needed and then send the updated \
'model' value directly into the `calculate` tool.";

const CALCULATE_INSTRUCTIONS: &str = "This is a fully calculated pricing result. Present line items \
and totals neatly to the user. Emphasise that all pricing is indicative and must be verified against \
statutory requirements, tender rules, and the client's final approval before submission.";

const MARKET_PRICES_INSTRUCTIONS: &str = "These are rough, simulated market estimates for the given \
item. Use them only as a sanity check when comparing your tender pricing. Always prefer real supplier \
quotations or official wage tables.";

const RENDER_REPORT_INSTRUCTIONS: &str = "This is the rendered HTML pricing report. Show it to the \
user for review or pass the 'html' value to `final_output`.";

const FINAL_OUTPUT_INSTRUCTIONS: &str = "Display this HTML in a preview pane or convert it to PDF \
for final download and submission.";

fn detect_instructions(result: &ExtractionResult) -> String {
    format!(
        "You are a tender pricing assistant. The input document has been classified as '{}'. \
         Use the 'pricing_items' as a rough starting point only. Cross-check everything against \
         the original tender and ask the user to paste key sections (pricing schedule, BOQ, \
         instructions) if they are not clearly visible here.",
        result.document_type
    )
}

/// A tool payload with its advisory instructions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResponse<T> {
    pub instructions: String,
    #[serde(flatten)]
    pub payload: T,
}

impl<T> ToolResponse<T> {
    pub fn new(instructions: impl Into<String>, payload: T) -> Self {
        ToolResponse {
            instructions: instructions.into(),
            payload,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuiltModel {
    pub model: PricingModel,
}

/// Configured entry point for all tools.
pub struct ToolKit {
    config: TenderConfig,
    pdf: Box<dyn PdfExtractor>,
    market: Box<dyn MarketPriceSource>,
}

impl ToolKit {
    /// Tool kit with the pdftotext backend and the simulated market.
    pub fn new(config: TenderConfig) -> Self {
        let market = SimulatedMarket::new(&config.market, config.pricing.currency.clone());
        ToolKit {
            config,
            pdf: Box::new(PdftotextExtractor::new()),
            market: Box::new(market),
        }
    }

    pub fn with_pdf_extractor(mut self, pdf: Box<dyn PdfExtractor>) -> Self {
        self.pdf = pdf;
        self
    }

    pub fn with_market_source(mut self, market: Box<dyn MarketPriceSource>) -> Self {
        self.market = market;
        self
    }

    pub fn config(&self) -> &TenderConfig {
        &self.config
    }

    pub fn detect_pricing_requirements(&self, file_path: &Path) -> ToolResponse<ExtractionResult> {
        let result = crate::detect_requirements(file_path, self.pdf.as_ref(), &self.config.pricing.currency);
        ToolResponse::new(detect_instructions(&result), result)
    }

    pub fn build_model(
        &self,
        description: &str,
        tender_rules: &str,
        company_rates: &str,
    ) -> ToolResponse<BuiltModel> {
        let model = build_pricing_model(description, tender_rules, company_rates, &self.config.pricing);
        ToolResponse::new(BUILD_MODEL_INSTRUCTIONS, BuiltModel { model })
    }

    pub fn calculate(&self, model_json: &Value) -> Result<ToolResponse<CalculationResult>, TenderError> {
        let result = crate::pricing::calculate(model_json, &self.config.pricing)?;
        Ok(ToolResponse::new(CALCULATE_INSTRUCTIONS, result))
    }

    pub fn market_prices(&self, item_name: &str) -> ToolResponse<MarketPriceResult> {
        let result = MarketPriceResult {
            item: item_name.to_string(),
            estimates: self.market.estimate(item_name),
        };
        ToolResponse::new(MARKET_PRICES_INSTRUCTIONS, result)
    }

    pub fn render_report(&self, pricing_data: &Value) -> ToolResponse<HtmlDocument> {
        let doc = crate::report::render_report(pricing_data, &self.config.report);
        ToolResponse::new(RENDER_REPORT_INSTRUCTIONS, doc)
    }

    pub fn final_output(&self, html: &str) -> ToolResponse<HtmlDocument> {
        ToolResponse::new(FINAL_OUTPUT_INSTRUCTIONS, HtmlDocument::new(html))
    }

    /// Run a tool by name with a JSON object of named arguments.
    pub fn dispatch(&self, tool: &str, args: &Value) -> Result<Value, TenderError> {
        tracing::debug!(tool, "dispatching tool call");
        let response = match tool {
            DETECT_PRICING_REQUIREMENTS => {
                let path = str_arg(tool, args, "file_path")?;
                serde_json::to_value(self.detect_pricing_requirements(Path::new(path)))?
            }
            BUILD_MODEL => {
                let description = str_arg(tool, args, "description")?;
                let tender_rules = str_arg(tool, args, "tender_rules")?;
                let company_rates = str_arg(tool, args, "company_rates")?;
                serde_json::to_value(self.build_model(description, tender_rules, company_rates))?
            }
            CALCULATE => {
                let model_json = arg(tool, args, "model_json")?;
                serde_json::to_value(self.calculate(model_json)?)?
            }
            MARKET_PRICES => {
                let item_name = str_arg(tool, args, "item_name")?;
                serde_json::to_value(self.market_prices(item_name))?
            }
            RENDER_REPORT => {
                let pricing_data = arg(tool, args, "pricing_data")?;
                serde_json::to_value(self.render_report(pricing_data))?
            }
            FINAL_OUTPUT => {
                let html = str_arg(tool, args, "html")?;
                serde_json::to_value(self.final_output(html))?
            }
            other => return Err(TenderError::UnknownTool(other.to_string())),
        };
        Ok(response)
    }
}

fn arg<'a>(tool: &str, args: &'a Value, name: &str) -> Result<&'a Value, TenderError> {
    let map = args.as_object().ok_or_else(|| TenderError::InvalidArguments {
        tool: tool.to_string(),
        reason: "arguments must be a JSON object".into(),
    })?;
    map.get(name).ok_or_else(|| TenderError::InvalidArguments {
        tool: tool.to_string(),
        reason: format!("missing argument '{name}'"),
    })
}

fn str_arg<'a>(tool: &str, args: &'a Value, name: &str) -> Result<&'a str, TenderError> {
    arg(tool, args, name)?
        .as_str()
        .ok_or_else(|| TenderError::InvalidArguments {
            tool: tool.to_string(),
            reason: format!("argument '{name}' must be a string"),
        })
}
