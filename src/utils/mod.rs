// 工具函数模块
// 包含文本匹配、URL规范化、输入验证等通用工具

pub mod text;
pub mod urls;
pub mod validation;

// 重新导出常用函数
pub use text::*;
pub use urls::*;
pub use validation::*;
