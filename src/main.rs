use anyhow::Result;
use exam_submit::utils::logging;
use exam_submit::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::from_env();

    // 初始化日志
    logging::init(config.verbose_logging);

    // 初始化并运行应用
    let summary = App::initialize(config)?.run().await?;
    anyhow::ensure!(summary.submitted, "答案未能提交");

    Ok(())
}
