//! Property-based tests for monomials, polynomials and the basis driver.
