use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Exercise directory fixture with a k8s/ manifest folder.
pub struct ExerciseDir {
    pub root: TempDir,
}

impl ExerciseDir {
    pub fn new() -> Self {
        let root = TempDir::new().expect("create temp exercise dir");
        fs::create_dir(root.path().join("k8s")).expect("create k8s dir");
        Self { root }
    }

    /// All four manifests in their full-marks form.
    pub fn with_complete_manifests() -> Self {
        let dir = Self::new();
        dir.write_manifest("deployment.yaml", COMPLETE_DEPLOYMENT);
        dir.write_manifest("service.yaml", COMPLETE_SERVICE);
        dir.write_manifest("configmap.yaml", COMPLETE_CONFIGMAP);
        dir.write_manifest("secret.yaml", COMPLETE_SECRET);
        dir
    }

    pub fn path(&self) -> &Path {
        self.root.path()
    }

    pub fn manifest_dir(&self) -> PathBuf {
        self.root.path().join("k8s")
    }

    pub fn write_manifest(&self, file_name: &str, content: &str) {
        fs::write(self.manifest_dir().join(file_name), content).expect("write manifest");
    }
}

pub const COMPLETE_DEPLOYMENT: &str = r#"apiVersion: apps/v1
kind: Deployment
metadata:
  name: k8s-challenge-app
spec:
  replicas: 3
  selector:
    matchLabels:
      app: k8s-challenge
  template:
    metadata:
      labels:
        app: k8s-challenge
    spec:
      containers:
        - name: app
          image: k8s-challenge-app:v1
          resources:
            limits:
              memory: 128Mi
              cpu: 250m
            requests:
              memory: 64Mi
              cpu: 100m
          livenessProbe:
            httpGet:
              path: /health
              port: 5000
          readinessProbe:
            httpGet:
              path: /health
              port: 5000
          envFrom:
            - configMapRef:
                name: k8s-challenge-config
          env:
            - name: API_KEY
              valueFrom:
                secretKeyRef:
                  name: k8s-challenge-secrets
                  key: api-key
"#;

pub const COMPLETE_SERVICE: &str = r#"apiVersion: v1
kind: Service
metadata:
  name: k8s-challenge-service
spec:
  type: NodePort
  selector:
    app: k8s-challenge
  ports:
    - port: 80
      targetPort: 5000
      nodePort: 30080
"#;

pub const COMPLETE_CONFIGMAP: &str = r#"apiVersion: v1
kind: ConfigMap
metadata:
  name: k8s-challenge-config
data:
  FLASK_ENV: production
  LOG_LEVEL: info
  APP_NAME: k8s-challenge
"#;

pub const COMPLETE_SECRET: &str = r#"apiVersion: v1
kind: Secret
metadata:
  name: k8s-challenge-secrets
type: Opaque
data:
  api-key: aGVsbG8=
"#;
