use crate::api::{handle_request, AppState};
use crate::config::Config;
use crate::logger;
use crate::models::{load_seed_file, SeedData};
use crate::store::MemoryStore;
use anyhow::{Context, Result};
use hyper::service::{make_service_fn, service_fn};
use hyper::Server;
use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// 应用主结构
pub struct App {
    config: Config,
    state: Arc<AppState>,
}

impl App {
    /// 初始化应用：加载种子数据并构建存储
    pub async fn initialize(config: Config) -> Result<Self> {
        let seed = load_seed(&config).await?;
        logger::log_startup(&config, seed.categories.len(), seed.questions.len());

        let store = Arc::new(MemoryStore::from_seed(seed));
        let state = Arc::new(AppState::new(store, config.questions_per_page));
        Ok(Self { config, state })
    }

    /// 运行 HTTP 服务直到收到 Ctrl-C
    pub async fn run(self) -> Result<()> {
        let addr: SocketAddr = self
            .config
            .bind_addr
            .parse()
            .with_context(|| format!("无法解析监听地址: {}", self.config.bind_addr))?;

        let (local_addr, handle) = serve(self.state.clone(), addr, shutdown_signal())?;
        info!("🌐 正在监听 http://{}", local_addr);

        handle.await.context("HTTP 服务任务异常终止")??;
        info!("👋 服务已停止");
        Ok(())
    }
}

/// 读取种子文件；文件不存在时以空题库启动
async fn load_seed(config: &Config) -> Result<SeedData> {
    let path = Path::new(&config.seed_file);
    if !path.exists() {
        warn!("⚠️ 种子文件 {} 不存在，以空题库启动", config.seed_file);
        return Ok(SeedData::default());
    }
    load_seed_file(path).await
}

/// 在 `addr` 上启动服务，返回实际监听地址与服务任务
///
/// `addr` 端口为 0 时由系统分配
pub fn serve(
    state: Arc<AppState>,
    addr: SocketAddr,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(SocketAddr, JoinHandle<Result<()>>)> {
    let make_svc = make_service_fn(move |_conn| {
        let state = state.clone();
        async move {
            Ok::<_, Infallible>(service_fn(move |req| handle_request(state.clone(), req)))
        }
    });

    let server = Server::try_bind(&addr)
        .with_context(|| format!("无法绑定地址: {}", addr))?
        .serve(make_svc);
    let local_addr = server.local_addr();

    let handle = tokio::spawn(async move {
        server
            .with_graceful_shutdown(shutdown)
            .await
            .context("HTTP 服务错误")
    });

    Ok((local_addr, handle))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("无法监听 Ctrl-C 信号: {}", e);
        // 无法监听信号时保持运行
        std::future::pending::<()>().await;
    }
    info!("收到停止信号，正在关闭服务...");
}
