use anyhow::Context;
use cafe_server::{Server, ServerState, print_banner, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 设置环境 (dotenv, 日志) 并加载配置
    let config = setup_environment();

    // 打印横幅
    print_banner();

    tracing::info!("☕ Cafe server starting...");

    // 2. 初始化服务器状态 (数据库、JWT、事件总线、管理员种子)
    let state = ServerState::initialize(&config).await;

    // 3. 启动 HTTP 服务器
    let server = Server::with_state(config, state);

    server.run().await.context("server exited with an error")?;

    Ok(())
}
