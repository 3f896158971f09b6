use dpllsat::*;

fn main() {
    env_logger::init();

    let x: Vec<_> = (1..=7).map(|i| Literal::new(format!("x{}", i))).collect();
    let (x1, x2, x3, x4, x5, x6, x7) = (&x[0], &x[1], &x[2], &x[3], &x[4], &x[5], &x[6]);

    let c1 = Clause::new(vec![-x2, -x3, -x4, x5.clone()]);
    let c2 = Clause::new(vec![-x1, -x5, x6.clone()]);
    let c3 = Clause::new(vec![-x5, x7.clone()]);
    let c4 = Clause::new(vec![-x1, -x6, -x7]);
    let c5 = Clause::new(vec![-x1, -x2, x5.clone()]);
    let c6 = Clause::new(vec![-x1, -x3, x5.clone()]);
    let c7 = Clause::new(vec![-x1, -x4, x5.clone()]);
    let c8 = Clause::new(vec![-x1, x2.clone(), x3.clone(), x4.clone(), x5.clone(), -x6]);
    let f = Cnf::new(vec![c1, c2, c3, c4, c5, c6, c7, c8]);

    println!("{}", f);
    println!("{}", f.decide());
}
