use std::fmt;

use log::{debug, info};
use rand::{rngs::StdRng, SeedableRng};

use crate::config::SimulationConfig;
use crate::error::{Result, VmError};
use crate::frame_store::FrameStore;
use crate::page_replacer::{PageEvent, PageReplacer, ReplacementContext};
use crate::page_table::PageTable;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SimulationState {
    Idle,
    Running,
    Complete,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraceEntry {
    pub step: usize,
    pub page: usize,
    pub fault: bool,
    pub frame: usize,
    pub evicted: Option<usize>,
    pub frames: Vec<Option<usize>>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Statistics {
    pub steps: usize,
    pub faults: usize,
    pub hits: usize,
    pub frames_in_use: usize,
    pub frame_count: usize,
}

impl Statistics {
    pub fn hit_ratio(&self) -> f64 {
        if self.steps == 0 {
            return 0.0;
        }

        self.hits as f64 / self.steps as f64
    }

    pub fn fault_ratio(&self) -> f64 {
        if self.steps == 0 {
            return 0.0;
        }

        self.faults as f64 / self.steps as f64
    }

    pub fn memory_utilization(&self) -> f64 {
        if self.frame_count == 0 {
            return 0.0;
        }

        self.frames_in_use as f64 / self.frame_count as f64
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "page faults: {}, hit ratio: {:.1}%, memory utilization: {:.1}%",
            self.faults,
            self.hit_ratio() * 100.0,
            self.memory_utilization() * 100.0
        )
    }
}

/// Demand paging over one reference string, one reference per [`step`](Simulator::step).
#[derive(Debug)]
pub struct Simulator {
    config: SimulationConfig,
    page_table: PageTable,
    frames: FrameStore,
    replacer: Box<dyn PageReplacer>,
    current_step: usize,
    faults: usize,
    hits: usize,
    faults_history: Vec<usize>,
    trace: Vec<TraceEntry>,
}

impl Simulator {
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;

        let (page_table, frames, replacer) = Self::fresh_memory(&config);

        let simulator = Simulator {
            config,
            page_table,
            frames,
            replacer,
            current_step: 0,
            faults: 0,
            hits: 0,
            faults_history: Vec::new(),
            trace: Vec::new(),
        };

        simulator.log_reset();

        Ok(simulator)
    }

    fn fresh_memory(config: &SimulationConfig) -> (PageTable, FrameStore, Box<dyn PageReplacer>) {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        (
            PageTable::new(config.virtual_page_count, &mut rng),
            FrameStore::new(config.frame_count),
            config.policy.replacer(config.frame_count),
        )
    }

    fn log_reset(&self) {
        info!(
            "simulator: reset with {} frames, {} virtual pages, {} references, policy {}",
            self.config.frame_count,
            self.config.virtual_page_count,
            self.config.reference_string.len(),
            self.config.policy
        );
    }

    /// Throws away all state and starts over under `config`. On error the
    /// simulator keeps its previous configuration and progress.
    pub fn reset(&mut self, config: SimulationConfig) -> Result<()> {
        *self = Simulator::new(config)?;

        Ok(())
    }

    pub fn restart(&mut self) {
        let (page_table, frames, replacer) = Self::fresh_memory(&self.config);

        self.page_table = page_table;
        self.frames = frames;
        self.replacer = replacer;
        self.current_step = 0;
        self.faults = 0;
        self.hits = 0;
        self.faults_history.clear();
        self.trace.clear();

        self.log_reset();
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn state(&self) -> SimulationState {
        if self.current_step >= self.config.reference_string.len() {
            SimulationState::Complete
        } else if self.current_step == 0 {
            SimulationState::Idle
        } else {
            SimulationState::Running
        }
    }

    pub fn is_complete(&self) -> bool {
        self.state() == SimulationState::Complete
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn page_table(&self) -> &PageTable {
        &self.page_table
    }

    pub fn frames(&self) -> &FrameStore {
        &self.frames
    }

    pub fn trace(&self) -> &[TraceEntry] {
        &self.trace
    }

    pub fn faults_history(&self) -> &[usize] {
        &self.faults_history
    }

    pub fn statistics(&self) -> Statistics {
        Statistics {
            steps: self.current_step,
            faults: self.faults,
            hits: self.hits,
            frames_in_use: self.frames.occupied(),
            frame_count: self.frames.len(),
        }
    }

    fn handle_page_fault(&mut self, page: usize) -> Result<(usize, Option<usize>)> {
        let (frame, evicted) = match self.frames.first_free() {
            Some(free) => (free, None),
            None => {
                let mut ctx = ReplacementContext {
                    page_table: &mut self.page_table,
                    frames: &self.frames,
                    references: &self.config.reference_string,
                    step: self.current_step,
                };

                let victim = self.replacer.pick_victim(&mut ctx)?;

                if victim >= self.frames.len() {
                    return Err(VmError::PolicyInvariantViolation(format!(
                        "{} chose frame {} of {}",
                        self.config.policy,
                        victim,
                        self.frames.len()
                    )));
                }

                let evicted = self
                    .page_table
                    .evict(&mut self.frames, victim)
                    .ok_or_else(|| {
                        VmError::PolicyInvariantViolation(format!(
                            "{} chose empty frame {}",
                            self.config.policy, victim
                        ))
                    })?;

                debug!("simulator: evicting page {} from frame {}", evicted, victim);

                self.replacer.page_event(PageEvent::Evicted {
                    page: evicted,
                    frame: victim,
                });

                (victim, Some(evicted))
            }
        };

        self.page_table.assign(&mut self.frames, page, frame)?;

        self.replacer.page_event(PageEvent::Loaded { page, frame });

        Ok((frame, evicted))
    }

    /// Processes the next reference.
    ///
    /// `SimulationComplete` and `UnknownPage` leave the simulator untouched.
    /// `PolicyInvariantViolation` is fatal: the access may already be recorded
    /// and the replacer state advanced, so the run must be reset.
    pub fn step(&mut self) -> Result<TraceEntry> {
        let step = self.current_step;

        let page = *self
            .config
            .reference_string
            .get(step)
            .ok_or(VmError::SimulationComplete { steps: step })?;

        // looked up before anything is touched so a bad page changes nothing
        let entry = *self.page_table.lookup(page)?;

        self.page_table.touch(page, step)?;
        self.replacer.page_event(PageEvent::Touched(page));

        let (fault, frame, evicted) = match entry.frame_index.filter(|_| entry.resident) {
            Some(frame) => {
                debug!("simulator: step {} page {} hit in frame {}", step, page, frame);
                self.hits += 1;
                (false, frame, None)
            }
            None => {
                debug!("simulator: step {} page {} fault! handling...", step, page);
                let (frame, evicted) = self.handle_page_fault(page)?;
                self.faults += 1;
                (true, frame, evicted)
            }
        };

        self.faults_history.push(self.faults);

        let trace_entry = TraceEntry {
            step,
            page,
            fault,
            frame,
            evicted,
            frames: self.frames.snapshot(),
        };

        self.trace.push(trace_entry.clone());
        self.current_step += 1;

        if self.is_complete() {
            info!("simulator: complete, {}", self.statistics());
        }

        Ok(trace_entry)
    }

    /// Steps until the reference string is exhausted or `keep_going` returns
    /// `false` for the entry just produced. Returns the number of steps taken.
    pub fn run_while<F>(&mut self, mut keep_going: F) -> Result<usize>
    where
        F: FnMut(&TraceEntry) -> bool,
    {
        let mut taken = 0;

        while !self.is_complete() {
            let entry = self.step()?;
            taken += 1;

            if !keep_going(&entry) {
                break;
            }
        }

        Ok(taken)
    }

    pub fn run(&mut self) -> Result<Statistics> {
        self.run_while(|_| true)?;

        Ok(self.statistics())
    }
}
