use crate::error::ResearchError;
use crate::parser::{extract_questions, MAX_QUESTIONS};
use crate::provider::TextGenerationService;
use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::executor::execute_task;
use super::prompts::{placeholder_question, question_request, strict_question_request, PromptSet};
use super::types::{
    Perspective, QuestionSet, ResearchTask, ResultGrid, TaskOutcome, TaskResult,
};

/// Cartesian product of the three question indices and the three perspectives
pub fn research_tasks() -> Vec<ResearchTask> {
    (0..MAX_QUESTIONS)
        .flat_map(|question_index| {
            Perspective::ALL.into_iter().map(move |perspective| ResearchTask {
                question_index,
                perspective,
            })
        })
        .collect()
}

/// Generates questions for a topic and fans each one out to every perspective
pub struct ResearchOrchestrator {
    service: Arc<dyn TextGenerationService>,
    prompts: PromptSet,
}

impl ResearchOrchestrator {
    pub fn new(service: Arc<dyn TextGenerationService>, prompts: PromptSet) -> Self {
        Self { service, prompts }
    }

    /// Ask for three questions, re-ask once with the explicit format if fewer
    /// come back, then pad with placeholders. Only a failure of the first
    /// request is fatal for the topic.
    pub async fn generate_questions(&self, topic: &str) -> Result<QuestionSet, ResearchError> {
        info!("Generating research questions for: {}", topic);

        let system = self.prompts.question_generator();
        let first = self
            .service
            .complete(system, &question_request(topic))
            .await
            .map_err(ResearchError::QuestionGeneration)?;

        let mut response = first.text;
        let mut questions = extract_questions(&response);

        if questions.len() < MAX_QUESTIONS {
            warn!(
                "Extracted {} of {} questions, re-asking with explicit format",
                questions.len(),
                MAX_QUESTIONS
            );
            match self
                .service
                .complete(system, &strict_question_request(topic))
                .await
            {
                Ok(retry) => {
                    questions = extract_questions(&retry.text);
                    response = retry.text;
                }
                Err(e) => {
                    warn!("Re-ask failed, keeping first attempt: {}", e);
                }
            }
        }

        if questions.len() < MAX_QUESTIONS {
            warn!(
                "Padding {} missing question(s) with placeholders",
                MAX_QUESTIONS - questions.len()
            );
        }

        let mut extracted = questions.into_iter();
        let questions =
            std::array::from_fn(|_| extracted.next().unwrap_or_else(|| placeholder_question(topic)));

        Ok(QuestionSet {
            response,
            questions,
        })
    }

    /// Dispatch all nine tasks at once and wait for every one to settle.
    /// The grid is keyed by task identity, never by completion order.
    pub async fn research(&self, questions: &[String; 3]) -> ResultGrid {
        let start = Instant::now();
        let tasks = research_tasks();
        info!("Launching {} research tasks in parallel", tasks.len());

        let mut futures = FuturesUnordered::new();
        for task in tasks {
            let handle = tokio::spawn(execute_task(
                self.service.clone(),
                task,
                self.prompts.perspective(task.perspective).to_string(),
                questions[task.question_index].clone(),
            ));
            futures.push(async move { (task, handle.await) });
        }

        let mut results = Vec::with_capacity(futures.len());
        while let Some((task, joined)) = futures.next().await {
            match joined {
                Ok(result) => {
                    debug!(
                        "Settled {} on Q{} in {:?}",
                        result.task.perspective,
                        result.task.question_index + 1,
                        result.duration
                    );
                    results.push(result);
                }
                Err(e) => {
                    warn!("Task panicked: {}", e);
                    results.push(TaskResult {
                        task,
                        outcome: TaskOutcome::Failed {
                            error: format!("task aborted: {}", e),
                        },
                        duration: Duration::ZERO,
                    });
                }
            }
        }

        let grid = ResultGrid::assemble(questions, results);
        info!(
            "All research settled in {:.1}s ({} failed)",
            start.elapsed().as_secs_f64(),
            grid.error_count()
        );
        grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;
    use crate::provider::Completion;
    use async_trait::async_trait;
    use std::collections::{HashSet, VecDeque};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    fn perspective_of(system: &str) -> Perspective {
        Perspective::ALL
            .into_iter()
            .find(|p| system.contains(&format!("{} researcher", p.id())))
            .unwrap()
    }

    /// Answers every research call, failing the listed (question, perspective) pairs.
    /// Later questions answer first so completion order differs from task order.
    struct GridService {
        failing: Vec<(&'static str, Perspective)>,
        calls: AtomicUsize,
    }

    impl GridService {
        fn new(failing: Vec<(&'static str, Perspective)>) -> Self {
            Self {
                failing,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl TextGenerationService for GridService {
        fn name(&self) -> &'static str {
            "grid"
        }

        async fn complete(&self, system: &str, user: &str) -> Result<Completion, ServiceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let perspective = perspective_of(system);
            let question = user.trim_start_matches("Research question: ");

            let delay = match question {
                "A?" => 30,
                "B?" => 15,
                _ => 0,
            };
            tokio::time::sleep(Duration::from_millis(delay)).await;

            if self
                .failing
                .iter()
                .any(|(q, p)| *q == question && *p == perspective)
            {
                return Err(ServiceError::Status {
                    status: 502,
                    body: "simulated outage".to_string(),
                });
            }

            Ok(Completion {
                text: format!("{} view of {}", perspective, question),
                duration: Duration::from_millis(delay),
            })
        }
    }

    /// Replays canned generations in order and records each user message
    struct ScriptedService {
        responses: Mutex<VecDeque<Result<String, ServiceError>>>,
        requests: Mutex<Vec<String>>,
    }

    impl ScriptedService {
        fn new(responses: Vec<Result<String, ServiceError>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TextGenerationService for ScriptedService {
        fn name(&self) -> &'static str {
            "scripted"
        }

        async fn complete(&self, _system: &str, user: &str) -> Result<Completion, ServiceError> {
            self.requests.lock().unwrap().push(user.to_string());
            let next = self
                .responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected extra request");
            next.map(|text| Completion {
                text,
                duration: Duration::ZERO,
            })
        }
    }

    fn questions() -> [String; 3] {
        ["A?".to_string(), "B?".to_string(), "C?".to_string()]
    }

    fn orchestrator(service: Arc<dyn TextGenerationService>) -> ResearchOrchestrator {
        ResearchOrchestrator::new(service, PromptSet::default())
    }

    #[test]
    fn test_research_tasks_cover_product_once() {
        let tasks = research_tasks();
        assert_eq!(tasks.len(), 9);
        let unique: HashSet<_> = tasks.iter().copied().collect();
        assert_eq!(unique.len(), 9);
        assert!(tasks.iter().all(|t| t.question_index < 3));
    }

    #[tokio::test]
    async fn test_single_failure_is_isolated() {
        let service = Arc::new(GridService::new(vec![("B?", Perspective::Mathematical)]));
        let grid = orchestrator(service.clone()).research(&questions()).await;

        assert_eq!(service.calls.load(Ordering::SeqCst), 9);
        assert_eq!(grid.len(), 3);
        assert_eq!(grid.error_count(), 1);

        assert!(grid[1].mathematical.is_error());
        assert!(grid[1]
            .mathematical
            .text()
            .starts_with("Error in mathematical analysis:"));
        assert!(grid[1].mathematical.text().contains("simulated outage"));
        assert_eq!(grid[1].scientific.text(), "scientific view of B?");
        assert_eq!(grid[1].philosophical.text(), "philosophical view of B?");

        for idx in [0, 2] {
            for cell in grid[idx].cells() {
                assert!(!cell.is_error());
            }
        }
    }

    #[tokio::test]
    async fn test_grid_shape_holds_when_everything_fails() {
        let mut failing = Vec::new();
        for q in ["A?", "B?", "C?"] {
            for p in Perspective::ALL {
                failing.push((q, p));
            }
        }
        let grid = orchestrator(Arc::new(GridService::new(failing)))
            .research(&questions())
            .await;

        assert_eq!(grid.len(), 3);
        assert_eq!(grid.error_count(), 9);
        for (idx, row) in grid.rows().iter().enumerate() {
            assert_eq!(row.question_index, idx);
            assert_eq!(row.question, questions()[idx]);
        }
    }

    #[tokio::test]
    async fn test_grid_follows_task_identity_not_completion_order() {
        let grid = orchestrator(Arc::new(GridService::new(Vec::new())))
            .research(&questions())
            .await;

        for (idx, q) in ["A?", "B?", "C?"].iter().enumerate() {
            assert_eq!(grid[idx].question, *q);
            for p in Perspective::ALL {
                assert_eq!(grid[idx].get(p).text(), format!("{} view of {}", p, q));
            }
        }
    }

    #[tokio::test]
    async fn test_generate_questions_first_attempt() {
        let service = Arc::new(ScriptedService::new(vec![Ok(
            "QUESTION 1: A?\nQUESTION 2: B?\nQUESTION 3: C?".to_string(),
        )]));
        let set = orchestrator(service.clone())
            .generate_questions("time")
            .await
            .unwrap();

        assert_eq!(set.questions, questions());
        assert_eq!(service.requests().len(), 1);
        assert_eq!(
            service.requests()[0],
            "Generate 3 research questions about: time"
        );
    }

    #[tokio::test]
    async fn test_generate_questions_reasks_once_on_shortfall() {
        let service = Arc::new(ScriptedService::new(vec![
            Ok("QUESTION 1: only one?".to_string()),
            Ok("QUESTION 1: X?\nQUESTION 2: Y?\nQUESTION 3: Z?".to_string()),
        ]));
        let set = orchestrator(service.clone())
            .generate_questions("time")
            .await
            .unwrap();

        assert_eq!(set.questions, ["X?", "Y?", "Z?"]);
        assert_eq!(set.response, "QUESTION 1: X?\nQUESTION 2: Y?\nQUESTION 3: Z?");
        let requests = service.requests();
        assert_eq!(requests.len(), 2);
        assert!(requests[1].contains("'QUESTION 1: [question]'"));
    }

    #[tokio::test]
    async fn test_generate_questions_pads_with_topic_placeholders() {
        let service = Arc::new(ScriptedService::new(vec![
            Ok("no markers here".to_string()),
            Ok("QUESTION 1: X?".to_string()),
        ]));
        let set = orchestrator(service)
            .generate_questions("black holes")
            .await
            .unwrap();

        assert_eq!(set.questions[0], "X?");
        assert_eq!(
            set.questions[1],
            "Additional research direction for black holes"
        );
        assert_eq!(set.questions[2], set.questions[1]);
    }

    #[tokio::test]
    async fn test_no_questions_after_reask_yields_three_placeholders() {
        let service = Arc::new(ScriptedService::new(vec![
            Ok("I would rather not.".to_string()),
            Ok("1. still\n2. no\n3. markers".to_string()),
        ]));
        let set = orchestrator(service.clone())
            .generate_questions("black holes")
            .await
            .unwrap();

        assert_eq!(service.requests().len(), 2);
        for question in &set.questions {
            assert_eq!(question, "Additional research direction for black holes");
        }
        assert_eq!(set.response, "1. still\n2. no\n3. markers");
    }

    #[tokio::test]
    async fn test_failed_reask_keeps_first_attempt() {
        let service = Arc::new(ScriptedService::new(vec![
            Ok("QUESTION 1: A?\nQUESTION 2: B?".to_string()),
            Err(ServiceError::Timeout(Duration::from_secs(1))),
        ]));
        let set = orchestrator(service)
            .generate_questions("time")
            .await
            .unwrap();

        assert_eq!(set.questions[..2], ["A?", "B?"]);
        assert!(set.questions[2].contains("time"));
        assert_eq!(set.response, "QUESTION 1: A?\nQUESTION 2: B?");
    }

    #[tokio::test]
    async fn test_first_generation_failure_is_fatal() {
        let service = Arc::new(ScriptedService::new(vec![Err(ServiceError::Api(
            "no credits".to_string(),
        ))]));
        let err = orchestrator(service.clone())
            .generate_questions("time")
            .await
            .unwrap_err();

        assert!(matches!(err, ResearchError::QuestionGeneration(ServiceError::Api(_))));
        assert_eq!(service.requests().len(), 1);
    }
}
