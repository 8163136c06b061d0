//! 生成周期 - 流程层
//!
//! 核心职责：定义"一次生成"的完整流程
//!
//! 流程顺序：
//! 1. 组装提示词（科目 + 组数）
//! 2. 逐组调用生成服务，结果按请求顺序排列
//! 3. 加科目标签，组装 PDF
//!
//! 任何一组失败都会让整个周期失败，不返回部分结果

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::{AppError, ComposeError, GenerationError, RenderError};
use crate::models::{Document, GenerationRequest, GenerationResult, Topic};
use crate::services::{DocumentAssembler, PromptComposer, TextGenerator};
use crate::utils::logging::{log_cycle_complete, log_cycle_start};
use crate::workflow::generation_ctx::GenerationCtx;

/// 生成周期
///
/// - 不持有任何可变状态，可以被多个请求共享
/// - 每次 `run` 都返回一份新的 Document
pub struct GenerationCycle {
    composer: PromptComposer,
    generator: Arc<dyn TextGenerator>,
    assembler: Arc<DocumentAssembler>,
    call_timeout: Duration,
    max_parallel: usize,
}

impl GenerationCycle {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        assembler: DocumentAssembler,
        call_timeout: Duration,
    ) -> Self {
        Self {
            composer: PromptComposer::new(),
            generator,
            assembler: Arc::new(assembler),
            call_timeout,
            max_parallel: 1,
        }
    }

    /// 按配置创建
    pub fn from_config(config: &Config, generator: Arc<dyn TextGenerator>) -> Self {
        Self::new(
            generator,
            DocumentAssembler::new(&config.font_path),
            config.generation_timeout(),
        )
        .with_max_parallel(config.max_parallel_generations)
    }

    /// 同一周期内同时进行的调用数，至少为 1
    pub fn with_max_parallel(mut self, max_parallel: usize) -> Self {
        self.max_parallel = max_parallel.max(1);
        self
    }

    pub fn assembler(&self) -> &DocumentAssembler {
        &self.assembler
    }

    pub fn composer(&self) -> &PromptComposer {
        &self.composer
    }

    /// 运行一次完整的生成周期
    pub async fn run(&self, topic: &str, count: usize) -> Result<Document, AppError> {
        let started = Instant::now();
        log_cycle_start(topic, count);

        let (topic, requests) = self.compose(topic, count).map_err(|e| {
            warn!("❌ 组装提示词失败: {}", e);
            AppError::from(e)
        })?;

        let results = self.generate_blocks(&requests).await?;
        let blocks: Vec<String> = results.iter().map(GenerationResult::labeled_block).collect();

        let document = self.assemble(topic, blocks).await?;
        log_cycle_complete(&document, started.elapsed());
        Ok(document)
    }

    fn compose(&self, topic: &str, count: usize) -> Result<(Topic, Vec<GenerationRequest>), ComposeError> {
        let topic: Topic = topic.parse()?;
        let requests = self.composer.compose_for(topic, count)?;
        Ok((topic, requests))
    }

    /// 依次发送请求，结果顺序与请求顺序一致
    ///
    /// 第一个失败会终止后续调用
    pub async fn generate_blocks(
        &self,
        requests: &[GenerationRequest],
    ) -> Result<Vec<GenerationResult>, AppError> {
        let count = requests.len();

        let calls: Vec<_> = requests
            .iter()
            .map(|request| self.generate_one(request, count))
            .collect();

        stream::iter(calls)
            .buffered(self.max_parallel)
            .try_collect()
            .await
    }

    async fn generate_one(
        &self,
        request: &GenerationRequest,
        count: usize,
    ) -> Result<GenerationResult, AppError> {
        let ctx = GenerationCtx::new(request.topic, request.repetition, count);
        info!("{} 🤖 调用 {}", ctx, self.generator.model_name());

        let outcome = tokio::time::timeout(self.call_timeout, self.generator.generate(&request.prompt))
            .await
            .unwrap_or(Err(GenerationError::Timeout(self.call_timeout)))
            .and_then(|text| {
                if text.trim().is_empty() {
                    Err(GenerationError::EmptyResponse {
                        model: self.generator.model_name().to_string(),
                    })
                } else {
                    Ok(text)
                }
            });

        match outcome {
            Ok(text) => {
                info!("{} ✅ 返回 {} 字符", ctx, text.chars().count());
                Ok(GenerationResult::new(request, text))
            }
            Err(e) => {
                error!("{} ❌ 生成失败: {}", ctx, e);
                Err(AppError::generation_failed(ctx.topic, ctx.repetition, ctx.count, e))
            }
        }
    }

    /// PDF 组装在阻塞线程中执行
    async fn assemble(&self, topic: Topic, blocks: Vec<String>) -> Result<Document, AppError> {
        let assembler = Arc::clone(&self.assembler);
        let title = topic.practice_title();

        let (blocks, assembled) = tokio::task::spawn_blocking(move || {
            let assembled = assembler.assemble(&title, &blocks);
            (blocks, assembled)
        })
        .await
        .map_err(|e| RenderError::Task(e.to_string()))?;

        let pdf = assembled.map_err(|e| {
            error!("❌ PDF 生成失败: {}", e);
            AppError::from(e)
        })?;

        Ok(Document::new(topic, blocks, pdf.bytes, pdf.page_count))
    }
}
