//! Static marketing copy for the landing page.

pub const PRODUCT_NAME: &str = "DocToData";

pub const HERO_TITLE: &str = "Convert PDFs & Images to Perfect CSV";
pub const HERO_SUBTITLE: &str = "The ultimate bank statement converter and PDF to Excel converter. \
     Handle scanned documents, handwritten text, and complex tables with perfect accuracy.";

/// (figure, caption)
pub const TRUST_INDICATORS: [(&str, &str); 4] = [
    ("99.9%", "Accuracy Rate"),
    ("10M+", "Files Processed"),
    ("50K+", "Happy Users"),
    ("24/7", "Support"),
];

pub const UPLOAD_HEADING: &str = "Choose Your Conversion Method";
pub const UPLOAD_SUBHEADING: &str =
    "Select the best processing method for your document type and accuracy requirements";

pub const COLUMN_HINT_TITLE: &str = "Specify Target Columns";
pub const COLUMN_HINT_PITCH: &str = "Boost accuracy by 40%! Tell our AI exactly which columns to extract. \
     This helps the AI focus on the right data and maintain perfect column alignment.";
pub const COLUMN_HINT_PLACEHOLDER: &str = "e.g., Date, Amount, Description, Balance";
/// (document kind, suggested columns)
pub const COLUMN_HINT_EXAMPLES: [(&str, &str); 2] = [
    ("Financial docs", "Date, Amount, Balance, Description"),
    ("Invoices", "Item, Quantity, Price, Total"),
];

pub const DROP_PROMPT: &str = "Drop your file here or click to upload";
pub const DROP_LIMITS: &str = "Supports PDF, PNG, JPG files up to 10MB";

/// (title, body)
pub const FEATURES: [(&str, &str); 6] = [
    (
        "Perfect Numeric Accuracy",
        "No rounding errors, misreads, or missing decimals. Critical for financial statements and precise data extraction.",
    ),
    (
        "Handwritten Text Support",
        "Advanced OCR technology handles scanned PDFs and even handwritten text with exceptional accuracy.",
    ),
    (
        "Layout Preservation",
        "Maintains column alignment and table relationships for perfect CSV/Excel output structure.",
    ),
    (
        "Large Collections",
        "Process multiple documents with varying formats, from short receipts to long financial statements.",
    ),
    (
        "Specialized Formats",
        "Works with contracts, receipts, invoices, bank statements, and other specialized document types.",
    ),
    (
        "Lightning Fast",
        "Quick processing times without compromising on accuracy. Get your Excel files in seconds.",
    ),
];

pub const UPCOMING: [(&str, &str); 3] = [
    (
        "Direct Integrations",
        "Export directly to Google Sheets, Excel, CSV, or QuickBooks. One-click integration with your favorite tools.",
    ),
    (
        "Batch Processing",
        "Upload hundreds of documents at once. Perfect for high-volume processing and enterprise workflows.",
    ),
    (
        "Advanced Features",
        "API access, custom templates, automated workflows, and many more powerful features coming soon.",
    ),
];

pub const SUBSCRIBE_HEADING: &str = "Stay Updated";
pub const SUBSCRIBE_PITCH: &str =
    "Get notified about new features, tips for better conversions, and exclusive offers";
pub const SUBSCRIBE_FINE_PRINT: &str = "No spam, unsubscribe at any time. We respect your privacy.";

pub const USE_CASES: [&str; 8] = [
    "Bank Statement to Excel Converter",
    "Invoice PDF to CSV",
    "Receipt Image to Excel",
    "Financial Report Converter",
    "Contract Data Extraction",
    "Tax Document Processing",
    "Expense Report Conversion",
    "Accounting Data Import",
];

pub const FOOTER_BLURB: &str = "The most advanced PDF to Excel converter and image to Excel converter. \
     Perfect for bank statement conversion and financial document processing.";
pub const FOOTER_PRODUCTS: [&str; 4] = [
    "PDF to CSV Converter",
    "Image to Excel",
    "Bank Statement Converter",
    "Handwritten Text OCR",
];
pub const FOOTER_SUPPORT: [&str; 4] = [
    "Help Center",
    "API Documentation",
    "Contact Support",
    "Privacy Policy",
];
pub const COPYRIGHT: &str = "© 2025 DocToData. All rights reserved.";
