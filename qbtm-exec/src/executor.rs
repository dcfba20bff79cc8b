//! Recursive CP-map evaluation over exact matrices
//!
//! The executor walks a circuit DAG depth-first, resolving children
//! through the content-addressed store and combining exact matrices
//! according to each primitive's semantics. Evaluation is deterministic:
//! the only ordering is the structural traversal, with Compose feeding
//! its left child's output into its right child.
//!
//! Content addressing makes reference cycles impossible (a circuit's
//! digest depends on its children's digests), so plain recursion is
//! sound; a depth limit still guards against adversarially deep chains
//! assembled offline.

use crate::error::{ExecError, Result};
use num_rational::BigRational;
use qbtm_algebra::{matrix_from_value, Matrix, Qi};
use qbtm_core::{Circuit, Prim, Store};
use tracing::trace;

/// Default recursion depth limit.
pub const MAX_DEPTH: usize = 512;

/// Evaluates circuits against a read-only store.
pub struct Executor<'a> {
    store: &'a Store,
    max_depth: usize,
}

impl<'a> Executor<'a> {
    /// An executor over the given store with the default depth limit.
    pub fn new(store: &'a Store) -> Self {
        Self {
            store,
            max_depth: MAX_DEPTH,
        }
    }

    /// An executor with a custom depth limit.
    pub fn with_max_depth(store: &'a Store, max_depth: usize) -> Self {
        Self { store, max_depth }
    }

    /// Evaluate `circuit` on `input`, producing a fresh output matrix.
    ///
    /// The store is only read; a failed execution leaves no trace.
    pub fn execute(&self, circuit: &Circuit, input: &Matrix) -> Result<Matrix> {
        self.execute_at(circuit, input, 0)
    }

    fn execute_at(&self, circuit: &Circuit, input: &Matrix, depth: usize) -> Result<Matrix> {
        if depth >= self.max_depth {
            return Err(ExecError::RecursionLimit {
                limit: self.max_depth,
            });
        }
        trace!(prim = %circuit.prim, depth, "dispatch");
        match circuit.prim {
            Prim::Id => Ok(input.clone()),

            Prim::Compose => {
                let [f, g] = self.resolve_pair(circuit)?;
                let mid = self.execute_at(f, input, depth + 1)?;
                self.execute_at(g, &mid, depth + 1)
            }

            Prim::Tensor => {
                // Baseline: evaluate each factor on the identity of its
                // declared domain and Kronecker the results.
                let [f, g] = self.resolve_pair(circuit)?;
                let f_out = self.execute_at(f, &Matrix::identity(f.domain.dim()), depth + 1)?;
                let g_out = self.execute_at(g, &Matrix::identity(g.domain.dim()), depth + 1)?;
                Ok(f_out.kronecker(&g_out))
            }

            Prim::Swap => {
                // TODO: build the tensor-factor exchange permutation for
                // multi-block domains instead of the identity.
                let p = Matrix::identity(circuit.domain.dim());
                Ok(p.mul(input)?.mul(&p.dagger())?)
            }

            Prim::Discard => {
                let mut out = Matrix::zeros(1, 1);
                out.set(0, 0, input.trace()?);
                Ok(out)
            }

            Prim::Zero => {
                let dim = circuit.codomain.dim();
                Ok(Matrix::zeros(dim, dim))
            }

            Prim::Unitary => {
                let u = self.data_matrix(circuit)?;
                Ok(u.mul(input)?.mul(&u.dagger())?)
            }

            Prim::Choi => self.apply_choi(circuit, input),

            Prim::Prepare => self.data_matrix(circuit),

            Prim::Add => {
                let [f, g] = self.resolve_pair(circuit)?;
                let f_out = self.execute_at(f, input, depth + 1)?;
                let g_out = self.execute_at(g, input, depth + 1)?;
                Ok(f_out.add(&g_out)?)
            }

            Prim::Scale => {
                let factor = self.data_rational(circuit)?;
                let child = self.resolve_one(circuit)?;
                let out = self.execute_at(child, input, depth + 1)?;
                Ok(out.scale(&factor))
            }

            _ => Err(ExecError::UnsupportedPrimitive(circuit.prim)),
        }
    }

    /// Channel application through the Choi matrix J:
    /// Φ(ρ)[i,j] = Σ_{k,l} ρ[l,k] · J[k·d_out+i, l·d_out+j].
    fn apply_choi(&self, circuit: &Circuit, input: &Matrix) -> Result<Matrix> {
        let j = self.data_matrix(circuit)?;
        let d_in = circuit.domain.dim();
        let d_out = circuit.codomain.dim();

        let joint = d_in * d_out;
        if j.shape() != (joint, joint) {
            return Err(qbtm_algebra::AlgebraError::ShapeMismatch {
                op: "choi",
                lhs_rows: j.rows(),
                lhs_cols: j.cols(),
                rhs_rows: joint,
                rhs_cols: joint,
            }
            .into());
        }
        if input.shape() != (d_in, d_in) {
            return Err(qbtm_algebra::AlgebraError::ShapeMismatch {
                op: "choi input",
                lhs_rows: input.rows(),
                lhs_cols: input.cols(),
                rhs_rows: d_in,
                rhs_cols: d_in,
            }
            .into());
        }

        let mut out = Matrix::zeros(d_out, d_out);
        for i in 0..d_out {
            for jj in 0..d_out {
                let mut sum = Qi::zero();
                for k in 0..d_in {
                    for l in 0..d_in {
                        let rho = input.get(l, k);
                        let entry = j.get(k * d_out + i, l * d_out + jj);
                        sum = &sum + &(rho * entry);
                    }
                }
                out.set(i, jj, sum);
            }
        }
        Ok(out)
    }

    fn resolve_one(&self, circuit: &Circuit) -> Result<&'a Circuit> {
        self.expect_children(circuit, 1)?;
        self.resolve_child(circuit, 0)
    }

    fn resolve_pair(&self, circuit: &Circuit) -> Result<[&'a Circuit; 2]> {
        self.expect_children(circuit, 2)?;
        Ok([
            self.resolve_child(circuit, 0)?,
            self.resolve_child(circuit, 1)?,
        ])
    }

    fn expect_children(&self, circuit: &Circuit, expected: usize) -> Result<()> {
        if circuit.children.len() != expected {
            return Err(ExecError::BadChildren {
                prim: circuit.prim,
                expected,
                actual: circuit.children.len(),
            });
        }
        Ok(())
    }

    fn resolve_child(&self, circuit: &Circuit, index: usize) -> Result<&'a Circuit> {
        let qgid = circuit.children[index];
        self.store
            .get_circuit(&qgid)
            .ok_or(ExecError::MissingReference {
                prim: circuit.prim,
                index,
                qgid,
            })
    }

    fn data_matrix(&self, circuit: &Circuit) -> Result<Matrix> {
        matrix_from_value(&circuit.data).map_err(|_| ExecError::BadData {
            prim: circuit.prim,
            expected: "a matrix value",
        })
    }

    fn data_rational(&self, circuit: &Circuit) -> Result<BigRational> {
        circuit.data.as_rat().cloned().ok_or(ExecError::BadData {
            prim: circuit.prim,
            expected: "a rational",
        })
    }
}
