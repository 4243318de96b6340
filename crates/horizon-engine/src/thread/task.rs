use std::any::Any;
use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};

use super::stats::RenderStats;

/// Deferred unit of work that needs the graphics context.
///
/// Executed exactly once, on the render thread, with mutable access to the
/// backend. A returned error is logged; it never reaches the submitter.
pub type GpuTask<B> = Box<dyn FnOnce(&mut B) -> anyhow::Result<()> + Send + 'static>;

/// Result of running one GPU task.
#[derive(Debug)]
pub enum TaskOutcome {
    Completed,
    /// The task returned an error.
    Failed(anyhow::Error),
    /// The task panicked; carries the panic message.
    Panicked(String),
}

/// Runs a single task, containing both error returns and panics.
pub(crate) fn run_task<B>(backend: &mut B, task: GpuTask<B>) -> TaskOutcome {
    match panic::catch_unwind(AssertUnwindSafe(|| task(backend))) {
        Ok(Ok(())) => TaskOutcome::Completed,
        Ok(Err(err)) => TaskOutcome::Failed(err),
        Err(payload) => TaskOutcome::Panicked(panic_message(payload.as_ref())),
    }
}

/// Runs a drained batch in submission order.
///
/// A failing task is logged and skipped over; the remaining tasks still run.
pub(crate) fn run_tasks<B>(backend: &mut B, tasks: VecDeque<GpuTask<B>>, stats: &RenderStats) {
    let count = tasks.len();
    for (index, task) in tasks.into_iter().enumerate() {
        match run_task(backend, task) {
            TaskOutcome::Completed => stats.task_completed(),
            TaskOutcome::Failed(err) => {
                log::error!("GPU task {}/{count} failed: {err:#}", index + 1);
                stats.task_failed();
            }
            TaskOutcome::Panicked(msg) => {
                log::error!("GPU task {}/{count} panicked: {msg}", index + 1);
                stats.task_failed();
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        hits: Vec<&'static str>,
    }

    fn task(f: impl FnOnce(&mut Counter) -> anyhow::Result<()> + Send + 'static) -> GpuTask<Counter> {
        Box::new(f)
    }

    #[test]
    fn completed_task() {
        let mut c = Counter::default();
        let outcome = run_task(&mut c, task(|c| {
            c.hits.push("ran");
            Ok(())
        }));
        assert!(matches!(outcome, TaskOutcome::Completed));
        assert_eq!(c.hits, vec!["ran"]);
    }

    #[test]
    fn failed_task_carries_error() {
        let mut c = Counter::default();
        let outcome = run_task(&mut c, task(|_| anyhow::bail!("shader exploded")));
        match outcome {
            TaskOutcome::Failed(err) => assert_eq!(err.to_string(), "shader exploded"),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn panicking_task_is_contained() {
        let mut c = Counter::default();
        let outcome = run_task(&mut c, task(|_| panic!("buffer overflow")));
        match outcome {
            TaskOutcome::Panicked(msg) => assert_eq!(msg, "buffer overflow"),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn formatted_panic_message_is_kept() {
        let mut c = Counter::default();
        let id = 42;
        let outcome = run_task(&mut c, task(move |_| panic!("bad id {id}")));
        assert!(matches!(outcome, TaskOutcome::Panicked(ref m) if m == "bad id 42"));
    }

    #[test]
    fn batch_continues_past_faults() {
        let mut c = Counter::default();
        let stats = RenderStats::default();
        let tasks: VecDeque<GpuTask<Counter>> = VecDeque::from(vec![
            task(|c| {
                c.hits.push("first");
                Ok(())
            }),
            task(|_| anyhow::bail!("nope")),
            task(|_| panic!("boom")),
            task(|c| {
                c.hits.push("last");
                Ok(())
            }),
        ]);

        run_tasks(&mut c, tasks, &stats);

        assert_eq!(c.hits, vec!["first", "last"]);
        let snap = stats.snapshot();
        assert_eq!(snap.tasks_completed, 2);
        assert_eq!(snap.tasks_failed, 2);
    }
}
